/*
 * Common Dataflow Application Layer
 *
 * Interceptor, per-unit analyzer and the cached query facade.
 */

mod analyzer;
mod common_dataflow;
mod interceptor;

pub use analyzer::BodyAnalyzer;
pub use common_dataflow::CommonDataflow;
pub use interceptor::RecordingInterceptor;
