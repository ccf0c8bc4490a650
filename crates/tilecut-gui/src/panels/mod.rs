pub mod controls;
pub mod crop_interaction;
pub mod menu_bar;
pub mod reference;
pub mod status;
pub mod viewport;
