pub mod theme;
pub mod command;
pub mod element;
pub mod subscription;
pub mod resource;
pub mod app;
pub mod renderer;
pub mod runtime;
pub mod apps;

pub use theme::{Theme, ThemeVariant};
pub use command::Command;
pub use element::{Choice, ColumnBuilder, Element, Layer, LayoutConstraint, RowBuilder};
pub use subscription::Subscription;
pub use resource::Resource;
pub use app::App;
pub use renderer::{Renderer, InteractionRegistry};
pub use runtime::Runtime;
