/// How many tokens the moderator may spend; one word is expected.
pub(crate) const MODERATOR_MAX_TOKENS: u32 = 5;

const MODERATOR_PROMPT: &str = "\
You are a moderator for a conversation between a student and a teacher.
Your task is to determine if the conversation has reached a natural conclusion.
The conversation is about a specific topic, and the student is trying to learn.
The conversation should stop if the student has understood the topic, or if the \
conversation is going in circles, or if it seems like student and teacher model \
try to teach each other.
The conversation should also stop if the student and teacher say goodbye to each other.

Here is the conversation so far:
{conversation_history}

Do you think the conversation should stop?
Answer with only one word: \"STOP\" or \"CONTINUE\".";

pub(crate) fn moderator_prompt(conversation_history: &str) -> String {
    MODERATOR_PROMPT.replace("{conversation_history}", conversation_history)
}
