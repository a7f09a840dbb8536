pub mod notes;
pub mod tags;
pub mod todos;

pub use notes::NoteService;
pub use todos::TodoService;
