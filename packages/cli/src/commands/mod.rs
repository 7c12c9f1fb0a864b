pub mod contact;
pub mod edit;
pub mod init;
pub mod passwd;
pub mod render;
pub mod show;
pub mod site;

pub use contact::{contact, ContactArgs};
pub use edit::{add, remove, set, upload, AddArgs, RemoveArgs, SetArgs, UploadArgs};
pub use init::{init, InitArgs};
pub use passwd::{passwd, PasswdArgs};
pub use render::{render, RenderArgs};
pub use show::{keys, show, KeysArgs, ShowArgs};
