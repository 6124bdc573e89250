//! Binary-level test suites exercising the library the way the CLI does.
