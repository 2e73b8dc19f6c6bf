pub mod app_reducer;
pub mod command_palette_reducer;
pub mod output_panel_reducer;
