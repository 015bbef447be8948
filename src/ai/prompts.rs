use crate::models::{QuizQuestion, QuizSection};

const LISTENING_TOPICS: [&str; 6] = [
    "Short Conversations (Part A)",
    "Longer Conversations (Part B)",
    "Talks & Lectures (Part C)",
    "Idioms & Expressions",
    "Inference in Dialogues",
    "Note-taking Strategies",
];

const STRUCTURE_TOPICS: [&str; 6] = [
    "Subject-Verb Agreement",
    "Clauses & Connectors",
    "Parallel Structure",
    "Comparisons & Superlatives",
    "Appositives",
    "Error Identification Strategies",
];

const READING_TOPICS: [&str; 6] = [
    "Main Idea Questions",
    "Detail & Fact Questions",
    "Vocabulary in Context",
    "Inference Questions",
    "Author's Purpose Questions",
    "Skimming & Scanning Techniques",
];

pub fn topics(section: QuizSection) -> &'static [&'static str] {
    match section {
        QuizSection::Listening => &LISTENING_TOPICS,
        QuizSection::Structure => &STRUCTURE_TOPICS,
        QuizSection::Reading => &READING_TOPICS,
    }
}

pub fn question_prompt(section: QuizSection) -> String {
    let base = format!(
        "You are a TOEFL ITP expert. Generate a practice question for the \"{}\" section. \
         Provide the response as a single, valid JSON object.",
        section
    );
    let schema = "The JSON object must have these keys: \"question\" (string), \"options\" \
                  (an object with keys \"A\", \"B\", \"C\", \"D\" and string values), and \
                  \"answer\" (a string containing the key of the correct option, e.g., \"A\").";

    match section {
        QuizSection::Listening => format!(
            "{} The question should be for Part A (Short Conversations). {} \
             Also include an \"audioScript\" key (string) with a short dialogue.",
            base, schema
        ),
        QuizSection::Structure => format!(
            "{} The question should be a sentence completion task. \
             Use '____' to indicate the blank. {}",
            base, schema
        ),
        QuizSection::Reading => format!(
            "{} {} Also include a \"passage\" key (string) with a short academic \
             paragraph (around 100-150 words).",
            base, schema
        ),
    }
}

pub fn analysis_prompt(question: &QuizQuestion, user_answer: &str) -> String {
    let correctness = if user_answer == question.answer {
        "benar"
    } else {
        "salah"
    };
    let context = question
        .passage
        .as_deref()
        .or(question.audio_script.as_deref())
        .unwrap_or("");
    let options = serde_json::to_string(&question.options).unwrap_or_default();

    format!(
        r#"You are a TOEFL ITP tutor. A student answered a practice question.
- The question was: "{} {}"
- The options were: {}
- The correct answer is: ({}) {}
- The student's answer was: ({}) {}, which was {}.

Provide a concise analysis in Indonesian.
1.  Start by confirming the correct answer.
2.  Explain clearly and simply why the correct answer is right.
3.  If the student was wrong, briefly explain the mistake in their choice.

Format the response in simple Markdown."#,
        context,
        question.question,
        options,
        question.answer,
        question.option_text(&question.answer),
        user_answer,
        question.option_text(user_answer),
        correctness
    )
}

pub fn material_prompt(section: QuizSection, topic: &str) -> String {
    let body = match section {
        QuizSection::Listening => format!(
            r#"You are a TOEFL ITP expert listening comprehension tutor.
Explain the material for the "Listening Comprehension" section on the topic of "{}" comprehensively.

Your explanation must include:
1.  **Skill Overview**: What this part of the test measures and what the questions look like.
2.  **Strategies**: Specific strategies for predicting and catching the answer while listening.
3.  **Example Script**: Provide a short transcript typical of this part of the test.
4.  **Example Question**: Create a question based on the script.
5.  **Detailed Analysis**: Explain how to arrive at the correct answer, and why other options are incorrect."#,
            topic
        ),
        QuizSection::Structure => format!(
            r#"You are a TOEFL ITP expert grammar tutor.
Explain the material for the "Structure and Written Expression" section on the topic of "{}" comprehensively.

Your explanation must include:
1.  **Core Concept**: A clear explanation of the grammar rule.
2.  **Examples**: Show examples of correct and incorrect sentences to illustrate the rule.
3.  **Example Question**: Provide a typical TOEFL-style question for this topic (either sentence completion or error identification).
4.  **Detailed Analysis**: Explain the answer to the example question, detailing why the correct choice is right and others are wrong."#,
            topic
        ),
        QuizSection::Reading => format!(
            r#"You are a TOEFL ITP expert reading comprehension tutor.
Explain the material for the "Reading Comprehension" section on the topic of "{}" comprehensively.

Your explanation must include:
1.  **Skill Overview**: What this type of question is asking and why it's important.
2.  **Strategies**: Specific, actionable strategies for finding the answer in the passage quickly and accurately.
3.  **Example Passage**: Provide a short academic-style passage (around 100-150 words).
4.  **Example Question**: Create a question related to the topic based on the passage.
5.  **Detailed Analysis**: Explain how to use the strategies to arrive at the correct answer, and why other options are incorrect."#,
            topic
        ),
    };

    format!(
        "{}\n\nFormat the entire response in simple Markdown. Use headings, bold text, and lists \
         to make it easy to read.\nThe language must be in Indonesian.",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_question() -> QuizQuestion {
        let options: BTreeMap<String, String> = [("A", "ran"), ("B", "runs"), ("C", "running"), ("D", "run")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QuizQuestion {
            question: "She ____ every morning.".to_string(),
            options,
            answer: "B".to_string(),
            passage: Some("A short passage.".to_string()),
            audio_script: None,
        }
    }

    #[test]
    fn test_question_prompt_requests_section_field() {
        assert!(question_prompt(QuizSection::Listening).contains("\"audioScript\""));
        assert!(question_prompt(QuizSection::Reading).contains("\"passage\""));

        let structure = question_prompt(QuizSection::Structure);
        assert!(!structure.contains("\"audioScript\""));
        assert!(!structure.contains("\"passage\""));
        assert!(structure.contains("____"));
    }

    #[test]
    fn test_question_prompt_is_deterministic() {
        for section in QuizSection::ALL {
            assert_eq!(question_prompt(section), question_prompt(section));
        }
    }

    #[test]
    fn test_analysis_prompt_correct_answer() {
        let prompt = analysis_prompt(&sample_question(), "B");
        assert!(prompt.contains("A short passage. She ____ every morning."));
        assert!(prompt.contains("The correct answer is: (B) runs"));
        assert!(prompt.contains("(B) runs, which was benar"));
        assert!(prompt.contains("Indonesian"));
    }

    #[test]
    fn test_analysis_prompt_wrong_answer() {
        let prompt = analysis_prompt(&sample_question(), "D");
        assert!(prompt.contains("(D) run, which was salah"));
        assert!(prompt.contains(r#"{"A":"ran","B":"runs","C":"running","D":"run"}"#));
    }

    #[test]
    fn test_material_prompts_differ_per_section() {
        let structure = material_prompt(QuizSection::Structure, "Appositives");
        let reading = material_prompt(QuizSection::Reading, "Appositives");
        assert_ne!(structure, reading);
        assert!(structure.contains("\"Appositives\""));
        assert!(structure.contains("Structure and Written Expression"));
        assert!(reading.ends_with("The language must be in Indonesian."));
    }

    #[test]
    fn test_every_section_has_topics() {
        for section in QuizSection::ALL {
            assert_eq!(topics(section).len(), 6);
        }
        assert_eq!(topics(QuizSection::Structure)[0], "Subject-Verb Agreement");
    }
}
