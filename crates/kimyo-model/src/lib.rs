pub mod blocks;
pub mod icon;
pub mod module;
pub mod palette;
pub mod topic;
pub mod wire;

pub use blocks::{Block, BlockDocument};
pub use icon::Icon;
pub use module::Grade;
pub use module::Module;
pub use module::ModulePatch;
pub use module::NewModule;
pub use palette::ColorToken;
pub use topic::NewTopic;
pub use topic::Topic;
pub use topic::TopicRecord;
