/// Common interface for string clustering algorithms (every input in exactly one group).
pub trait Clustering {
    /// Partition `inputs` into groups of owned strings.
    ///
    /// Every input appears in exactly one group; duplicates are kept as separate members.
    fn cluster<I, S>(&self, inputs: I) -> Vec<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Partition `inputs`, returning each group as positions into `inputs`.
    ///
    /// Groups come in the same order as [`cluster`](Clustering::cluster) would return them.
    fn cluster_indices<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<Vec<usize>>;

    /// Return one cluster label per input position.
    ///
    /// Label `k` means the input belongs to the `k`-th group of
    /// [`cluster_indices`](Clustering::cluster_indices), so labels are dense in `0..n_groups`.
    fn cluster_labels<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<usize> {
        let mut labels = vec![0; inputs.len()];
        for (label, members) in self.cluster_indices(inputs).into_iter().enumerate() {
            for idx in members {
                labels[idx] = label;
            }
        }
        labels
    }

    /// The configured number of refinement passes.
    fn iterations(&self) -> usize;
}
