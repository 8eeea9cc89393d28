use super::Fragment;

/// The host scene receiving the fragments.
pub trait FractureSink {
    /// Called each time a fragment is produced, when real-time progress is requested.
    ///
    /// The fragment may still be re-fractured or modified afterward.
    fn fragment_created(&mut self, _fragment: &Fragment) {}

    /// Receives the final fragments, once per run.
    fn register(&mut self, collection: &str, fragments: Vec<Fragment>);
}

/// A sink collecting the fragments in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    /// The name of the collection of the last registration.
    pub collection: String,
    /// The registered fragments.
    pub fragments: Vec<Fragment>,
    /// The number of progress notifications received.
    pub num_progress_events: usize,
}

impl FractureSink for VecSink {
    fn fragment_created(&mut self, _fragment: &Fragment) {
        self.num_progress_events += 1;
    }

    fn register(&mut self, collection: &str, fragments: Vec<Fragment>) {
        self.collection = collection.to_string();
        self.fragments.extend(fragments);
    }
}
