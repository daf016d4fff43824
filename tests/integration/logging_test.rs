// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{app, get, unreachable_solr};
use std::io;
use std::sync::{Arc, Mutex};

/// 收集日志输出的共享缓冲区
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// 每次抓取的摘要只在 debug 级别输出
#[tokio::test]
async fn scrape_summary_is_logged_at_debug() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let _ = get(app(&unreachable_solr(), "", false), "/metrics").await;

    let logs = buffer.contents();
    let summary = logs
        .lines()
        .find(|line| line.contains("Served metrics scrape"))
        .expect("scrape summary should be logged");
    assert!(summary.contains("DEBUG"), "unexpected level: {}", summary);
    assert!(!summary.contains(" INFO "));
}
