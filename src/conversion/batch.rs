use crate::conversion::engine::{ConversionEngine, ConvertedData};
use crate::conversion::stats::ConversionStatistics;
use crate::conversion::{ConversionOptions, ConversionResult};
use crate::parser::InputSource;

/// Batch convert multiple InputSource inputs with one set of options. Optionally continue on errors.
///
/// `sink` sees every source together with its outcome, in order, and may fail
/// the batch itself (e.g. when an output file cannot be written).
pub fn convert_batch_sources<F>(
    sources: &[InputSource],
    options: &ConversionOptions,
    continue_on_error: bool,
    mut sink: F,
) -> ConversionResult<ConversionStatistics>
where
    F: FnMut(&InputSource, &ConversionResult<ConvertedData>) -> ConversionResult<()>,
{
    options.validate()?;
    let engine = ConversionEngine::new(options.clone());
    let mut stats = ConversionStatistics::new();

    for source in sources {
        let result = engine.convert_from_source(source);
        sink(source, &result)?;

        match result {
            Ok(data) => stats.record_success(&data.metadata),
            Err(e) => {
                stats.record_failure();
                if !continue_on_error {
                    return Err(e);
                }
                tracing::warn!(
                    source = %source.description(),
                    error = %e.user_message(),
                    "skipping source that failed to convert"
                );
            }
        }
    }

    Ok(stats)
}
