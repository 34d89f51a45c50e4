use super::DIMENSIONS;

const HEADER: &str = "\
You are reviewing a tutoring dialogue between a student and a teacher. Here is the data:
[BEGIN DATA]
************
[Conversation]:
{conversation_text}
************
[END DATA]

Rate the teacher's overall effectiveness in teaching the student on a scale of 1 to 10.
Then score each pedagogical dimension below from 0 to 5 using its anchor scale, with a
short reasoning for every score.
";

pub(crate) fn grading_prompt(conversation_text: &str) -> String {
    let mut prompt = HEADER.replace("{conversation_text}", conversation_text);

    prompt.push_str("\n### Dimensions\n");
    for (i, dim) in DIMENSIONS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}: {}\n", i + 1, dim.title, dim.anchors));
    }

    prompt.push_str(
        "\nProvide your answer as plain text, one `Label: value` per line, in exactly this order:\n",
    );
    prompt.push_str("OverallRating: <1-10>\n");
    prompt.push_str("OverallReasoning: <one paragraph>\n");
    for dim in &DIMENSIONS {
        prompt.push_str(&format!("{}Score: <0-5>\n", dim.label));
        prompt.push_str(&format!("{}Reasoning: <one or two sentences>\n", dim.label));
    }
    prompt
}
