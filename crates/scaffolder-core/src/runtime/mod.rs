//! Runtime detection and tool execution
//!
//! This module provides:
//! - Java, Git and Gradle detection
//! - A tool runner with streamed output and timeouts

pub mod check;
pub mod tool;

pub use check::{
    check_git, check_gradle, check_java, check_runtimes, check_runtimes_with_advisory,
    java_major_version, Runtime, RuntimeInfo,
};
pub use tool::ToolManager;
