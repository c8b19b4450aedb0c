pub mod controller_settings;
