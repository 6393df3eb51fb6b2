pub mod chat_area;
pub mod dialogs;
pub mod input_bar;
pub mod result_card;
pub mod status_bar;
