// Document layer: turns a resolved RecordBundle into résumé and career
// statement view-models, a dashboard summary, and a Markdown export.

pub mod composer;
pub mod dashboard;
pub mod handlers;
pub mod markdown;
pub mod markup;
pub mod sections;
