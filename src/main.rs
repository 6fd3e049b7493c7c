//! Terminal shell and entry point.
//!
//! The shell plays the part of a list screen: it logs in, mounts one
//! [`ListController`] for the selected entity, reads commands from stdin and
//! re-renders whenever the controller publishes a new snapshot.
//!
//! # Commands
//!
//! - `/<text>`: search (debounced); `/` alone clears it
//! - `estado <value>`: status filter, applied immediately
//! - `filter <name> [value]`: any filter the view supports; no value clears it.
//!   Free-text filters such as dates are debounced like the search box
//! - `n` / `p` / `page <k>`: pagination
//! - `clear`: remove every filter
//! - `r`: refresh
//! - `del <id>`: deactivate a record, then refresh
//! - `view <candidates|vacancies|clients|interviews|users>`: switch list
//! - `logout`, `q`: leave
//!
//! Credentials come from `RECLUTA_EMAIL` and `RECLUTA_PASSWORD`.

#![allow(clippy::multiple_crate_versions)]

use futures_util::future::BoxFuture;
use recluta::api::{ApiClient, SessionEvent, SessionStore};
use recluta::app::{Debounced, ListController, ListSnapshot, Notification};
use recluta::domain::{Candidate, Client, FilterKind, Interview, ListEntity, User, Vacancy};
use recluta::observability::init_tracing;
use recluta::ui::{compute_viewmodel, render};
use recluta::{Config, ReclutaError, Result};
use std::collections::BTreeMap;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

/// Entity lists the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewKind {
    Candidates,
    Vacancies,
    Clients,
    Interviews,
    Users,
}

impl ViewKind {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "candidates" | "candidatos" => Some(Self::Candidates),
            "vacancies" | "vacantes" => Some(Self::Vacancies),
            "clients" | "clientes" => Some(Self::Clients),
            "interviews" | "entrevistas" => Some(Self::Interviews),
            "users" | "usuarios" => Some(Self::Users),
            _ => None,
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Search(String),
    Filter { name: String, value: String },
    Next,
    Previous,
    Page(u32),
    Clear,
    Refresh,
    Deactivate(i64),
    View(ViewKind),
    Logout,
    Quit,
    Help,
    Invalid(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(text) = line.strip_prefix('/') {
        return Some(Command::Search(text.to_string()));
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word {
        "n" => Command::Next,
        "p" => Command::Previous,
        "page" => rest
            .parse()
            .map_or_else(|_| Command::Invalid(format!("página inválida: {rest}")), Command::Page),
        "clear" => Command::Clear,
        "r" => Command::Refresh,
        "estado" => Command::Filter {
            name: "estado".to_string(),
            value: rest.to_string(),
        },
        "filter" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if name.is_empty() {
                Command::Invalid("uso: filter <nombre> [valor]".to_string())
            } else {
                Command::Filter {
                    name: name.to_string(),
                    value: value.trim().to_string(),
                }
            }
        }
        "del" => rest
            .parse()
            .map_or_else(|_| Command::Invalid(format!("id inválido: {rest}")), Command::Deactivate),
        "view" => ViewKind::parse(rest)
            .map_or_else(|| Command::Invalid(format!("vista desconocida: {rest}")), Command::View),
        "logout" => Command::Logout,
        "q" | "quit" => Command::Quit,
        "h" | "help" | "?" => Command::Help,
        other => Command::Invalid(format!("comando desconocido: {other}")),
    };
    Some(command)
}

/// Type-erased list screen.
trait View: Send {
    fn title(&self) -> &'static str;
    fn search(&mut self, text: String) -> bool;
    fn set_filter(&mut self, name: &str, value: &str) -> bool;
    fn next_page(&self);
    fn previous_page(&self);
    fn set_page(&self, page: u32);
    fn clear_filters(&mut self);
    fn refresh(&self);
    fn render(&self);
    fn changed(&mut self) -> BoxFuture<'_, ()>;
    fn deactivate(&self, id: i64) -> BoxFuture<'static, Result<()>>;
}

struct EntityView<E: ListEntity> {
    list: ListController<E>,
    snapshots: watch::Receiver<ListSnapshot<E>>,
    inputs: BTreeMap<&'static str, Debounced<String>>,
    client: ApiClient,
}

impl<E: ListEntity> EntityView<E> {
    fn mount(client: &ApiClient, config: &Config, notifications: mpsc::UnboundedSender<Notification>) -> Self {
        let list = ListController::with_notifications(Arc::new(client.clone()), config.page_size, notifications);
        let inputs = list.debounce_filters(config);

        let snapshots = list.subscribe();
        list.mount();
        tracing::debug!(entity = E::RESOURCE, inputs = inputs.len(), "view mounted");

        Self {
            list,
            snapshots,
            inputs,
            client: client.clone(),
        }
    }

    fn search_input(&self) -> Option<&Debounced<String>> {
        let spec = E::FILTERS.iter().find(|f| f.kind == FilterKind::Search)?;
        self.inputs.get(spec.name)
    }
}

impl<E: ListEntity> View for EntityView<E> {
    fn title(&self) -> &'static str {
        E::TITLE
    }

    fn search(&mut self, text: String) -> bool {
        let Some(spec) = E::FILTERS.iter().find(|f| f.kind == FilterKind::Search) else {
            return false;
        };
        self.set_filter(spec.name, &text)
    }

    fn set_filter(&mut self, name: &str, value: &str) -> bool {
        if E::filter(name).is_none() {
            return false;
        }
        match self.inputs.get_mut(name) {
            Some(input) => input.update(value.to_string()),
            None => self.list.set_filter(name, value),
        }
        true
    }

    fn next_page(&self) {
        self.list.next_page();
    }

    fn previous_page(&self) {
        self.list.previous_page();
    }

    fn set_page(&self, page: u32) {
        self.list.set_page(page);
    }

    fn clear_filters(&mut self) {
        for input in self.inputs.values_mut() {
            input.update(String::new());
        }
        self.list.clear_filters();
    }

    fn refresh(&self) {
        self.list.refresh();
    }

    fn render(&self) {
        let snapshot = self.snapshots.borrow().clone();
        let typed = self.search_input().map_or("", |s| s.raw().as_str());
        render(&compute_viewmodel(&snapshot, typed));
    }

    fn changed(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if self.snapshots.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
    }

    fn deactivate(&self, id: i64) -> BoxFuture<'static, Result<()>> {
        let client = self.client.clone();
        Box::pin(async move { client.deactivate::<E>(id).await })
    }
}

fn mount_view(
    kind: ViewKind,
    client: &ApiClient,
    config: &Config,
    notifications: &mpsc::UnboundedSender<Notification>,
) -> Box<dyn View> {
    let tx = notifications.clone();
    match kind {
        ViewKind::Candidates => Box::new(EntityView::<Candidate>::mount(client, config, tx)),
        ViewKind::Vacancies => Box::new(EntityView::<Vacancy>::mount(client, config, tx)),
        ViewKind::Clients => Box::new(EntityView::<Client>::mount(client, config, tx)),
        ViewKind::Interviews => Box::new(EntityView::<Interview>::mount(client, config, tx)),
        ViewKind::Users => Box::new(EntityView::<User>::mount(client, config, tx)),
    }
}

fn credentials() -> Result<(String, String)> {
    match (std::env::var("RECLUTA_EMAIL"), std::env::var("RECLUTA_PASSWORD")) {
        (Ok(email), Ok(password)) if !email.trim().is_empty() => Ok((email, password)),
        _ => Err(ReclutaError::Config(
            "RECLUTA_EMAIL and RECLUTA_PASSWORD must be set".to_string(),
        )),
    }
}

fn print_help() {
    println!("/texto buscar | estado <v> | filter <nombre> [v] | n | p | page <k> | clear | r | del <id>");
    println!("view <candidates|vacancies|clients|interviews|users> | logout | q");
}

fn toast(notification: &Notification) {
    match notification {
        Notification::Success(message) => println!("✓ {message}"),
        Notification::Error(message) => println!("✗ {message}"),
    }
}

async fn run(config: Config) -> Result<()> {
    let session = Arc::new(SessionStore::new());
    let client = ApiClient::new(&config, session.clone())?;

    if client.health_check().await.is_err() {
        println!("✗ {}", recluta::domain::error::NETWORK_ERROR_MESSAGE);
    }

    let (email, password) = credentials()?;
    let user = client.login(&email, &password).await?;
    println!("Bienvenido, {} ({})", user.nombre, user.rol.label());

    let mut session_events = session.subscribe();

    let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
    let mut view = mount_view(ViewKind::Candidates, &client, &config, &notify_tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(command) = parse_command(&line) else { continue };
                tracing::debug!(command = ?command, "command");

                match command {
                    Command::Search(text) => {
                        if !view.search(text) {
                            println!("{} no tiene búsqueda", view.title());
                        }
                    }
                    Command::Filter { name, value } => {
                        if !view.set_filter(&name, &value) {
                            println!("{} no tiene el filtro {name}", view.title());
                        }
                    }
                    Command::Next => view.next_page(),
                    Command::Previous => view.previous_page(),
                    Command::Page(page) => view.set_page(page),
                    Command::Clear => view.clear_filters(),
                    Command::Refresh => view.refresh(),
                    Command::Deactivate(id) => match view.deactivate(id).await {
                        Ok(()) => {
                            toast(&Notification::Success(format!("Registro {id} desactivado")));
                            view.refresh();
                        }
                        Err(e) => toast(&Notification::Error(e.user_message())),
                    },
                    Command::View(kind) => {
                        view = mount_view(kind, &client, &config, &notify_tx);
                    }
                    Command::Logout => {
                        client.logout();
                    }
                    Command::Quit => break,
                    Command::Help => print_help(),
                    Command::Invalid(message) => println!("{message}"),
                }
            }
            () = view.changed() => view.render(),
            Some(notification) = notify_rx.recv() => toast(&notification),
            Ok(()) = session_events.changed() => {
                let event = session_events.borrow_and_update().clone();
                match event {
                    SessionEvent::Expired => {
                        println!("Sesión expirada. Iniciando sesión de nuevo…");
                        client.login(&email, &password).await?;
                        view.refresh();
                    }
                    SessionEvent::LoggedOut => {
                        println!("Sesión cerrada");
                        break;
                    }
                    SessionEvent::Anonymous | SessionEvent::LoggedIn { .. } => {}
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("recluta: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);
    tracing::debug!(api_url = %config.api_url, "starting");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shell stopped");
            eprintln!("recluta: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
