pub mod command_palette_view_model;
pub mod output_panel_view_model;

pub use command_palette_view_model::CommandPaletteViewModel;
pub use output_panel_view_model::OutputPanelViewModel;
