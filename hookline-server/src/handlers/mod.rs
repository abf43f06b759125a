pub mod activities;
pub mod system;
pub mod view;
pub mod webhook;
