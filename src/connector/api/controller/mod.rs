mod ask_controller;

pub use ask_controller::AskController;
