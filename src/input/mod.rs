pub mod classifier;
pub mod handler;
pub mod slot;

pub use classifier::{HandPose, SimulatedClassifier};
pub use handler::{InputHandler, KeyAction};
pub use slot::{SlotReader, SlotWriter, classification_slot};
