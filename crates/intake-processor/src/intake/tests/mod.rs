mod common;
mod email;
mod service;
