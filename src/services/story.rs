//! Mock narrative replies for the chat proxy
//!
//! Everything here is pure: callers pass the RNG, so a seeded `StdRng`
//! reproduces a reply exactly.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schemas::chat::{AssistantMessage, CompletionUsage, MockChatCompletion, MockChoice};
use crate::utils::{char_len, truncate_str};

/// Scene-setting openers; one is picked per reply
pub const SCENE_LINES: [&str; 5] = [
    "Вы находитесь в загадочном мире снов. ",
    "Вокруг вас плывут образы из забытых воспоминаний. ",
    "Воздух наполнен магической энергией. ",
    "Перед вами открывается вид на фантастический пейзаж. ",
    "Вы чувствуете древнюю силу этого места. ",
];

pub const QUESTIONS: [&str; 4] = [
    "Что вы хотите сделать?",
    "Как вы поступите?",
    "Каковы ваши дальнейшие действия?",
    "Что будете исследовать первым делом?",
];

/// Numbered actions; a reply lists [`OPTIONS_SHOWN`] of them
pub const ACTION_OPTIONS: [&str; 8] = [
    "1. Исследовать таинственный лес",
    "2. Подняться на древнюю башню",
    "3. Искать подсказки на земле",
    "4. Прислушаться к голосам ветра",
    "5. Проверить свой инвентарь",
    "6. Искать магические артефакты",
    "7. Найти источник воды",
    "8. Разжечь костер для отдыха",
];

pub const OPTIONS_SHOWN: usize = 4;

/// Characters of the user's message quoted back
pub const QUOTE_LIMIT: usize = 80;

pub const MOCK_NOTE: &str = "Mock response - configure OPENAI_API_KEY or LLM_API_URL";

/// Pick one element uniformly; `None` for an empty slice.
pub fn pick_one<'a, R: Rng + ?Sized>(items: &[&'a str], rng: &mut R) -> Option<&'a str> {
    items.choose(rng).copied()
}

/// Shuffle a copy of `items` and keep the first `count`.
pub fn shuffle_and_take<'a, R: Rng + ?Sized>(items: &[&'a str], count: usize, rng: &mut R) -> Vec<&'a str> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Compose the reply text for `prompt`.
pub fn compose_story<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> String {
    let scene = pick_one(&SCENE_LINES, rng).unwrap_or_default();
    let question = pick_one(&QUESTIONS, rng).unwrap_or_default();
    let options = shuffle_and_take(&ACTION_OPTIONS, OPTIONS_SHOWN, rng);

    format!(
        "{}Вы сказали: \"{}\". {}\n\n{}",
        scene,
        truncate_str(prompt, QUOTE_LIMIT),
        question,
        options.join("\n")
    )
}

/// Wrap a composed story in the chat-completion shape.
pub fn mock_completion<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> MockChatCompletion {
    let content = compose_story(prompt, rng);
    let usage = CompletionUsage::new(char_len(prompt), char_len(&content));

    MockChatCompletion {
        choices: vec![MockChoice {
            message: AssistantMessage {
                content,
                role: "assistant".to_string(),
            },
        }],
        usage,
        note: MOCK_NOTE.to_string(),
    }
}
