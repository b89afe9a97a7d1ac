use anyhow::Error;
use ctrlc::set_handler;
use log::{debug, info};
use solo_poker::{StepResult, Table, constants::NEXT_HAND_DELAY};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::{MissedTickBehavior, interval, sleep},
};

mod config;
mod render;

/// What a line typed at the terminal asks for
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Nothing,
    Show,
    Help,
    Quit,
    Act(&'a str),
}

fn parse_line(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Nothing,
        "table" | "t" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        action => Command::Act(action),
    }
}

fn print_events(table: &mut Table, json: bool) {
    for event in table.drain_events() {
        println!("{}", render::event(&event, json));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    let Some(args) = config::Args::from_env()? else {
        return Ok(());
    };

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();

    // Ctrl+C just leaves, there's nothing to save.
    set_handler(|| std::process::exit(0))?;

    let mut table = match args.seed {
        Some(seed) => Table::with_seed(args.settings.clone(), seed),
        None => Table::new(args.settings.clone()),
    };
    let settings = table.settings();
    if settings.big_blind != args.settings.big_blind {
        println!(
            "blinds adjusted to ${}/{} so the small blind is exactly half",
            settings.small_blind(),
            settings.big_blind
        );
    }

    let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let (deal_tx, mut deal_rx) = mpsc::channel::<()>(1);
    let mut ticker = interval(args.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut prompted = false;
    let mut deal_armed = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = table.advance();
                print_events(&mut table, args.json);
                match result {
                    StepResult::AwaitingHuman { to_call } => {
                        if !prompted {
                            println!("{}", render::prompt(&table.view(), to_call));
                            prompted = true;
                        }
                    }
                    StepResult::WaitingNextHand => {
                        if !deal_armed {
                            deal_armed = true;
                            let deal_tx = deal_tx.clone();
                            tokio::spawn(async move {
                                sleep(NEXT_HAND_DELAY).await;
                                let _ = deal_tx.send(()).await;
                            });
                        }
                    }
                    StepResult::SessionOver(outcome) => {
                        println!("{}", render::game_over(&table.view(), outcome));
                        break;
                    }
                    StepResult::Stepped(street) => debug!("stepped to {street}"),
                }
            }
            Some(()) = deal_rx.recv() => {
                deal_armed = false;
                table.start_next_hand();
            }
            line = line_rx.recv() => {
                let Some(line) = line else {
                    info!("stdin closed, leaving the table");
                    break;
                };
                match parse_line(&line) {
                    Command::Nothing => {}
                    Command::Show => println!("{}", render::table(&table.view())),
                    Command::Help => print!("{}", config::HELP),
                    Command::Quit => break,
                    Command::Act(command) => match table.submit_command(command) {
                        // The table either accepts it on the next tick or
                        // rejects it with an event; ask again either way.
                        Ok(()) => prompted = false,
                        Err(err) => println!("✗ {err}"),
                    },
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  "), Command::Nothing);
        assert_eq!(parse_line("t"), Command::Show);
        assert_eq!(parse_line("quit\n"), Command::Quit);
        assert_eq!(parse_line("raise 60"), Command::Act("raise 60"));
    }
}
