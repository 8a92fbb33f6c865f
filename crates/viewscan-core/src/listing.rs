use tracing::info;

use crate::error::ListError;
use crate::fetcher::ViewFetcher;
use crate::scanner::scan_view;
use crate::types::ResultMap;

/// List every `on_change` trigger declared in the form/tree views of `models`.
///
/// Models and their views are processed one at a time in listing order; all
/// of them feed the same result map, so triggers found in embedded views of a
/// related model are merged with those of that model's own views.
pub fn list_triggers<F, I>(fetcher: &F, models: I) -> Result<ResultMap, ListError<F::Error>>
where
    F: ViewFetcher + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut acc = ResultMap::new();
    list_triggers_into(fetcher, models, &mut acc)?;
    Ok(acc)
}

/// Same as [`list_triggers`] with a caller-owned accumulator. Whatever was
/// collected before a failure stays in `acc`.
pub fn list_triggers_into<F, I>(
    fetcher: &F,
    models: I,
    acc: &mut ResultMap,
) -> Result<(), ListError<F::Error>>
where
    F: ViewFetcher + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for model in models {
        let model = model.as_ref();
        let views = fetcher.fetch_views(model).map_err(ListError::Fetch)?;
        info!(model, views = views.len(), "scanning model views");
        for view in &views {
            let view_name = view.name.to_string();
            scan_view(model, &view_name, &view.descriptor, acc)?;
        }
    }
    Ok(())
}
