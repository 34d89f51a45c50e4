use crate::metrics::AggregateData;

/// Render the batch summary. The structure is fixed: title, Summary section,
/// Statistical Metrics section with talk time as a percentage and every
/// other metric as a plain 2-decimal value, in dimension order.
pub fn render_markdown(data: &AggregateData) -> String {
    let m = &data.metrics;
    let mut report = String::from("# EduBench Evaluation Report\n\n");

    report.push_str("## Summary\n");
    report.push_str(&format!("- Average Rating: {:.2}\n", data.average_rating));
    report.push_str(&format!(
        "- Number of Evaluations: {}\n\n",
        data.num_evaluations
    ));

    report.push_str("## Statistical Metrics\n");
    report.push_str(&format!(
        "- Student Talk Time: {:.2}%\n",
        m.student_talk_time * 100.0
    ));
    report.push_str(&format!(
        "- Average Words per Turn: {:.2}\n",
        m.average_words_per_turn
    ));
    for (title, value) in [
        ("First-Mile Diagnostics", m.first_mile_diagnostics),
        ("Retrieval Practice", m.retrieval_practice),
        ("Reflect & Revisit", m.reflect_revisit),
        ("Interleaved Practice", m.interleaved_practice),
        ("Guided Examples", m.guided_examples),
        ("Feedback Quality", m.feedback_quality),
        ("Socratic Reasoning", m.socratic_reasoning),
        ("Misconception Diagnosis", m.misconception_diagnosis),
        ("Motivation & Relevance", m.motivation_relevance),
        ("Beliefs & Attributions", m.beliefs_attributions),
    ] {
        report.push_str(&format!("- {}: {:.2}\n", title, value));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricAverages;

    #[test]
    fn report_has_the_fixed_structure() {
        let data = AggregateData {
            average_rating: 7.0,
            num_evaluations: 3,
            metrics: MetricAverages {
                student_talk_time: 0.4091,
                average_words_per_turn: 5.5,
                socratic_reasoning: 3.3333,
                ..Default::default()
            },
        };

        let report = render_markdown(&data);
        assert!(report.starts_with("# EduBench Evaluation Report\n\n## Summary\n"));
        assert!(report.contains("- Average Rating: 7.00\n"));
        assert!(report.contains("- Number of Evaluations: 3\n"));
        assert!(report.contains("- Student Talk Time: 40.91%\n"));
        assert!(report.contains("- Average Words per Turn: 5.50\n"));
        assert!(report.contains("- Socratic Reasoning: 3.33\n"));
        assert!(report.contains("- Beliefs & Attributions: 0.00\n"));
    }

    #[test]
    fn empty_batch_renders_zeros() {
        let report = render_markdown(&AggregateData::default());
        assert!(report.contains("- Average Rating: 0.00\n"));
        assert!(report.contains("- Number of Evaluations: 0\n"));
        assert!(report.contains("- Student Talk Time: 0.00%\n"));
    }
}
