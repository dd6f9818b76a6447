//! Tokgrab engine: conversion client and background effect execution.
mod convert;
mod engine;
mod types;
mod wire;

pub use convert::{ConvertSettings, Converter, ReqwestConverter, DEFAULT_ENDPOINT};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    AuthorInfo, ConvertError, ConvertOutput, DownloadLink, EngineEvent, FailureKind, MediaFormat,
    RequestId,
};
pub use wire::parse_response;
