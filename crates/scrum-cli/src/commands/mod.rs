pub mod csv;
pub mod dispatch;
pub mod export;
pub mod project;
pub mod retro;
pub mod shared;
pub mod sprint;
pub mod task;
pub mod user;
