//! UIコンポーネント

pub mod navbar;
pub mod upload_form;
pub mod home_view;
pub mod pie_chart;
pub mod clause_card;
pub mod phase_view;
