mod config;
mod error;
mod quiz;
mod view;

use std::sync::Arc;

use config::Config;
use dotenv::dotenv;
use error::QuizError;
use quiz::session::Session;
use quiz::Domain;
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ParseMode},
};
use view::QuizInput;

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveDomainChoice,
    ReceiveAmountOfQuestions {
        domains: Vec<Domain>,
    },
    ReceiveSeed {
        domains: Vec<Domain>,
        amount: usize,
    },
    Quiz {
        session: Session,
    },
}

type QuizStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    // A missing .env is fine, the variables may come from the environment.
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting PMP quiz bot...");

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            log::error!("{}", err);
            return;
        }
    };
    log::debug!("Loaded {:?}", config);

    let bot = Bot::from_env();

    // Sessions live only as long as the process.
    let storage: QuizStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveDomainChoice].endpoint(receive_domain_choice))
            .branch(
                dptree::case![State::ReceiveAmountOfQuestions { domains }]
                    .endpoint(receive_amount_of_questions),
            )
            .branch(dptree::case![State::ReceiveSeed { domains, amount }].endpoint(receive_seed))
            .branch(dptree::case![State::Quiz { session }].endpoint(run_quiz)),
    )
    .dependencies(dptree::deps![storage, config])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

fn domain_keyboard() -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = Domain::ALL
        .iter()
        .map(|d| vec![KeyboardButton::new(d.label())])
        .collect();
    rows.push(vec![KeyboardButton::new(view::ALL_DOMAINS_BUTTON)]);
    KeyboardMarkup::new(rows)
}

fn quiz_keyboard(session: &Session) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = Vec::new();
    if let Some(question) = session.current_question() {
        if session.current_record().is_none() {
            rows.push(
                (0..question.options.len())
                    .map(|i| KeyboardButton::new(view::option_label(i)))
                    .collect(),
            );
            rows.push(vec![KeyboardButton::new(view::SKIP_BUTTON)]);
        }
        rows.push(vec![
            KeyboardButton::new(view::PREVIOUS_BUTTON),
            KeyboardButton::new(view::NEXT_BUTTON),
        ]);
    } else {
        rows.push(vec![KeyboardButton::new(view::PREVIOUS_BUTTON)]);
    }
    rows.push(vec![KeyboardButton::new(view::RESET_BUTTON)]);
    KeyboardMarkup::new(rows)
}

async fn ask_for_domain(bot: &Bot, chat_id: ChatId, dialogue: &QuizDialogue) -> HandlerResult {
    dialogue.update(State::ReceiveDomainChoice).await?;
    bot.send_message(
        chat_id,
        "Which domain do you want to practice? Pick a button, or type several separated by commas (e.g. \"Process, People\").",
    )
    .reply_markup(domain_keyboard())
    .await?;
    Ok(())
}

/// Sends the current question, or the summary once the quiz is over. The
/// keyboard goes with the last message.
async fn show_session(bot: &Bot, chat_id: ChatId, session: &Session) -> HandlerResult {
    let messages = if session.is_complete() {
        view::render_summary(&session.summary(), session)
    } else {
        view::render_question(session).into_iter().collect()
    };

    let last = messages.len().saturating_sub(1);
    for (i, text) in messages.into_iter().enumerate() {
        if text.chars().count() > view::MAX_MESSAGE_LEN {
            log::warn!("Message of {} chars exceeds the Telegram limit", text.chars().count());
        }
        let request = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
        if i == last {
            request.reply_markup(quiz_keyboard(session)).await?;
        } else {
            request.await?;
        }
    }
    Ok(())
}

async fn report(bot: &Bot, chat_id: ChatId, err: &QuizError) -> HandlerResult {
    log::warn!("Rejected: {}", err);
    bot.send_message(chat_id, format!("⚠ {}", err)).await?;
    Ok(())
}

const GREETING_TEXT: &str = "Hi! I am a PMP exam simulator. I will ask you scenario questions across Process, People and Business Environment. Confirm an answer to see its explanation.";
async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;
    ask_for_domain(&bot, msg.chat.id, &dialogue).await
}

async fn receive_domain_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    config: Arc<Config>,
    msg: Message,
) -> HandlerResult {
    let domains = match msg.text() {
        Some(text) => match view::parse_domains(text) {
            Ok(domains) => domains,
            Err(err) => return report(&bot, msg.chat.id, &err).await,
        },
        None => {
            bot.send_message(msg.chat.id, "Please choose one of the options")
                .await?;
            return Ok(());
        }
    };

    let mut counts = vec![config.question_count];
    counts.extend([10, 25, 50, 100, 200].into_iter().filter(|c| *c != config.question_count));
    let keyboard = KeyboardMarkup::new(
        counts
            .iter()
            .map(|c| vec![KeyboardButton::new(c.to_string())])
            .collect::<Vec<_>>(),
    );
    dialogue
        .update(State::ReceiveAmountOfQuestions { domains })
        .await?;
    bot.send_message(msg.chat.id, "How many questions?")
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

async fn receive_amount_of_questions(
    bot: Bot,
    dialogue: QuizDialogue,
    config: Arc<Config>,
    domains: Vec<Domain>,
    msg: Message,
) -> HandlerResult {
    let amount = match msg.text().map(|t| t.trim().parse::<usize>()) {
        Some(Ok(amount)) if amount > 0 => amount,
        Some(Ok(_)) => {
            bot.send_message(msg.chat.id, "The number of questions can't be 0")
                .await?;
            return Ok(());
        }
        _ => {
            bot.send_message(msg.chat.id, "Please enter a number").await?;
            return Ok(());
        }
    };

    dialogue
        .update(State::ReceiveSeed { domains, amount })
        .await?;
    bot.send_message(
        msg.chat.id,
        "Pick a random seed. The same seed gives the same quiz order.",
    )
    .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(
        config.seed.to_string(),
    )]]))
    .await?;
    Ok(())
}

async fn receive_seed(
    bot: Bot,
    dialogue: QuizDialogue,
    config: Arc<Config>,
    (domains, amount): (Vec<Domain>, usize),
    msg: Message,
) -> HandlerResult {
    let seed = match msg.text().map(|t| t.trim().parse::<u64>()) {
        Some(Ok(seed)) => seed,
        _ => {
            bot.send_message(msg.chat.id, "Please enter a non-negative number")
                .await?;
            return Ok(());
        }
    };

    let mut session = Session::new(config.skip_policy);
    if let Err(err) = session.start(seed, &domains, amount) {
        report(&bot, msg.chat.id, &err).await?;
        return ask_for_domain(&bot, msg.chat.id, &dialogue).await;
    }

    // Saved before sending, so a failed send cannot lose the new session.
    dialogue
        .update(State::Quiz {
            session: session.clone(),
        })
        .await?;
    show_session(&bot, msg.chat.id, &session).await
}

async fn run_quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let options = session
        .current_question()
        .map(|q| q.options.len())
        .unwrap_or(0);
    let input = match msg.text().and_then(|t| QuizInput::parse(t, options)) {
        Some(input) => input,
        None => {
            bot.send_message(msg.chat.id, "Please use the buttons below")
                .reply_markup(quiz_keyboard(&session))
                .await?;
            return Ok(());
        }
    };
    log::debug!("{:?} at position {}", input, session.position());

    if input == QuizInput::Reset {
        log::info!("Resetting quiz");
        dialogue.update(State::ReceiveDomainChoice).await?;
        bot.send_message(msg.chat.id, "Quiz reset.").await?;
        return ask_for_domain(&bot, msg.chat.id, &dialogue).await;
    }
    let result = input.apply(&mut session);

    // A recorded answer must survive a failed send.
    dialogue
        .update(State::Quiz {
            session: session.clone(),
        })
        .await?;
    if let Err(err) = result {
        report(&bot, msg.chat.id, &err).await?;
    }
    show_session(&bot, msg.chat.id, &session).await
}
