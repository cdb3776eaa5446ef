mod commands;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{
    config::{load_settings, ClientSettings},
    ClientEvent, ContestClient, DiagnosticBoard, HttpGateway,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
};
use tracing::{debug, info, warn};

use crate::commands::{HostCommand, HELP};

#[derive(Parser, Debug)]
#[command(name = "xcoder", about = "Competitive programming assistant client")]
struct Args {
    /// Base URL of the contest backend.
    #[arg(long)]
    backend_url: Option<String>,
    /// Path to a TOML config file (defaults to ./xcoder.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// tracing filter directive, e.g. `client_core=debug`.
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let gateway = HttpGateway::with_timeout(&settings.backend_url, settings.request_timeout())?;
    info!(endpoint = %gateway.endpoint(), "using contest backend");
    let client = Arc::new(ContestClient::new(Arc::new(gateway)));

    let event_task = tokio::spawn(show_events(
        client.clone(),
        client.subscribe_events(),
        settings.clone(),
    ));

    println!("{}", render::window(settings.landing_window));
    client.restore().await;
    println!("{}", render::status(&client.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == HostCommand::Quit {
            break;
        }
        dispatch(&client, command).await;
    }

    client.save_state().await;
    event_task.abort();
    Ok(())
}

async fn dispatch(client: &Arc<ContestClient>, command: HostCommand) {
    debug!(command = command.name(), "dispatching prompt command");
    match command {
        HostCommand::Open { directory } => {
            client.set_directory(&directory).await;
        }
        HostCommand::Close => {
            client.close_project().await;
        }
        HostCommand::Editor { path } => {
            client.set_editor(&path).await;
        }
        HostCommand::Language(language) => {
            client.set_language(language).await;
        }
        HostCommand::Contest(contest_type) => {
            client.set_contest_type(contest_type).await;
        }
        HostCommand::Problems(selection) => {
            client.set_problem_type_filter(selection).await;
        }
        HostCommand::HideSolved(hide) => {
            client.set_hide_solved(hide).await;
        }
        HostCommand::Next => {
            client.advance().await;
        }
        HostCommand::Previous => {
            client.retreat().await;
        }
        HostCommand::Show => match client.snapshot().await.problem {
            Some(problem) => println!("{}", render::problem(&problem)),
            None => println!("no problem loaded"),
        },
        // Judging runs in the background so navigation stays available.
        HostCommand::Run => {
            let client = client.clone();
            tokio::spawn(async move { client.run().await });
        }
        HostCommand::Submit => {
            let client = client.clone();
            tokio::spawn(async move { client.submit().await });
        }
        HostCommand::CreateFile => {
            client.create_file().await;
        }
        HostCommand::OpenFile => {
            client.open_file().await;
        }
        HostCommand::UpdateList => {
            client.update_problems_list().await;
        }
        HostCommand::Tab(tab) => {
            if !client.switch_tab(tab).await {
                println!("no results yet");
            }
            println!("{}", render::presentation(&client.presentation().await));
        }
        HostCommand::Case(index) => {
            client.set_selected_case(index).await;
            println!("{}", render::presentation(&client.presentation().await));
        }
        HostCommand::Languages => println!("{}", render::languages()),
        HostCommand::Help => println!("{HELP}"),
        HostCommand::Quit => {}
    }
}

async fn show_events(
    client: Arc<ContestClient>,
    mut events: broadcast::Receiver<ClientEvent>,
    settings: ClientSettings,
) {
    let mut board = DiagnosticBoard::new();
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "event receiver lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        match event {
            ClientEvent::WindowLayout(layout) => {
                println!("{}", render::window(settings.window_size(layout)));
            }
            ClientEvent::Diagnostic(diagnostic) => {
                let line = render::diagnostic(&diagnostic);
                if board.post(diagnostic) {
                    debug!("replaced an existing notification");
                }
                println!("{line}");
            }
            ClientEvent::ProblemReplaced(problem) => println!("{}", problem.heading()),
            ClientEvent::VerdictsApplied { .. } => {
                println!("{}", render::presentation(&client.presentation().await));
            }
        }
    }
}
