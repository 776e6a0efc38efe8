//! Core functionality for directory scanning and module extraction

pub mod extractor;
pub mod parallel;
pub mod parallel_scanner;
pub mod scanner;

pub use extractor::ModuleExtractor;
pub use parallel_scanner::ParallelScanner;
pub use scanner::Scanner;
