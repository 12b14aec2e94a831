/// Output of the two-stage local scoring of one extracted code segment.
#[derive(Debug, Clone)]
pub struct SegmentAnalysis {
    pub segment: String,
    pub classification: String,
    pub explanation: String,
}
