//! Startup banner.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Session settings shown at startup.
pub struct BannerInfo<'a> {
    pub endpoint: &'a str,
    pub user: &'a str,
    pub use_tools: bool,
    pub config: &'a str,
}

pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║        T A S K   T E S T E R          ║
   ║    type a task, see what comes back   ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   endpoint  {}
   user      {}
   tools     {}
   config    {}

   type /help for commands, /examples for ideas
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.endpoint,
        info.user,
        on_off(info.use_tools),
        info.config,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

pub fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
