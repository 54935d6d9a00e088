pub mod board;
pub mod dispatch;
pub mod requirement;
pub mod shared;
pub mod task;
