// UI Layer
pub mod components;
pub mod layout;
pub mod renderer;
pub mod theme;

pub use layout::{ActivePanel, LayoutManager};
pub use theme::Theme;

pub use components::{
    CommandBar, CommandItem, Dialog, DialogKind, InputPurpose, Panel, PanelStatus, StatusBar,
    WarningScreen,
};
