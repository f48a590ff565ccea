// ABOUTME: Tests for global tracing subscriber installation
// ABOUTME: Runs in its own binary because a process can install only one subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use evalfit::logging::{LogFormat, LoggingConfig};

#[test]
fn test_pretty_subscriber_installs_once() {
    let config = LoggingConfig {
        format: LogFormat::Pretty,
        include_location: true,
        include_spans: true,
        ..LoggingConfig::default()
    };

    assert!(config.init().is_ok());
    tracing::info!("pretty subscriber installed");

    let second = LoggingConfig {
        format: LogFormat::Json,
        ..LoggingConfig::default()
    };
    assert!(second.init().is_err());
}
