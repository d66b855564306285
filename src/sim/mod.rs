pub mod data;
pub mod event;
pub mod port;
pub mod session;
pub mod storyboard;
