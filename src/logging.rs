//! 日志宏入口：启用 logging 特性时转发到 tracing，关闭时编译为空操作

#[cfg(feature = "logging")]
pub(crate) use tracing::{debug, info, warn};

#[cfg(not(feature = "logging"))]
macro_rules! silent {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "logging"))]
pub(crate) use silent as debug;
#[cfg(not(feature = "logging"))]
pub(crate) use silent as info;
#[cfg(not(feature = "logging"))]
pub(crate) use silent as warn;
