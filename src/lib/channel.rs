//! Method-channel front end.
//!
//! Host applications talk to the font service over a named channel, sending a method name
//! and receiving either a result, an error or a "not implemented" marker. Only
//! `getSystemFonts` is answered.

use std::io::{BufRead, Write};

use log::debug;
use serde::Serialize;

use crate::assemble::{list_system_fonts, FontQuery};
use crate::classify::{Classifier, MetricProvider};
use crate::source::FontSource;
use crate::FontInfo;

pub const CHANNEL_NAME: &str = "com.example.f/fonts";
pub const GET_SYSTEM_FONTS: &str = "getSystemFonts";
pub const ERROR_CODE: &str = "ERROR";

/// Reply to one method call, serialized as a tagged JSON envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success { result: Vec<FontInfo> },
    Error { code: String, message: String },
    NotImplemented,
}

/// Answers method calls. Every `getSystemFonts` call runs a fresh query.
pub struct FontChannel<'a> {
    query: Box<dyn Fn() -> FontQuery + 'a>,
}

impl<'a> FontChannel<'a> {
    /// Queries `source` on every call.
    pub fn new(
        source: &'a dyn FontSource,
        classifier: &'a Classifier,
        provider: &'a dyn MetricProvider,
    ) -> Self {
        Self::from_fn(move || list_system_fonts(source, classifier, provider))
    }

    /// Runs `query` on every call, so it can rebuild its sources (e.g. rescan the font
    /// directories) each time.
    pub fn from_fn<F>(query: F) -> Self
    where
        F: Fn() -> FontQuery + 'a,
    {
        FontChannel {
            query: Box::new(query),
        }
    }

    pub fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    pub fn handle(&self, method: &str) -> MethodResponse {
        debug!("{} <- {}", CHANNEL_NAME, method);
        if method != GET_SYSTEM_FONTS {
            return MethodResponse::NotImplemented;
        }

        match (self.query)().into_result() {
            Ok(result) => MethodResponse::Success { result },
            Err(e) => MethodResponse::Error {
                code: ERROR_CODE.to_string(),
                message: capitalize(&e.to_string()),
            },
        }
    }

    /// Reads one method name per line and writes one JSON envelope per line.
    ///
    /// Blank lines are ignored. Returns the number of calls answered.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> std::io::Result<usize> {
        let mut answered = 0;
        for line in input.lines() {
            let line = line?;
            let method = line.trim();
            if method.is_empty() {
                continue;
            }
            let response = self.handle(method);
            serde_json::to_writer(&mut output, &response)?;
            writeln!(output)?;
            output.flush()?;
            answered += 1;
        }
        Ok(answered)
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
