/// Errors raised by the simulation core.
///
/// Both variants are programmer-error class: a config that fails validation,
/// or a grid with no free cell left for food.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("no free cell for food: {occupied} of {width}x{height} cells occupied")]
    GridFull {
        width: i32,
        height: i32,
        occupied: usize,
    },
}
