pub mod export;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod sales;
pub mod session;
pub mod teams;
