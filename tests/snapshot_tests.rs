//! Snapshot tests for TUI rendering
//!
//! Detail text is pinned with inline insta snapshots; rendered screens are
//! checked row by row on a `TestBackend`.

mod common;

use common::*;
use crossterm::event::KeyCode;
use insta::assert_snapshot;
use lazystack::models::{Flavor, Image, Project, Server};
use lazystack::tui::describe::{self, Dependent};
use lazystack::tui::display::{Notice, StatusLine};
use lazystack::tui::views::{render_footer, render_header};
use lazystack::tui::{InputMode, Theme};
use ratatui::{Terminal, backend::TestBackend};
use std::time::Instant;

/// Text of every row of the test terminal
fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(terminal: &Terminal<TestBackend>, needle: &str) -> bool {
    rows(terminal).iter().any(|row| row.contains(needle))
}

#[test]
fn test_project_confirmation_text() {
    let project = Project {
        id: "proj-prod".to_string(),
        name: "prod".to_string(),
        description: "Production workloads".to_string(),
        domain_id: "default".to_string(),
        enabled: true,
    };

    assert_snapshot!(describe::project(&project), @r"
    Current Project Set To:
    ID: proj-prod
    Name: prod
    Description: Production workloads
    DomainID: default
    Enabled: true
    ");
}

#[test]
fn test_server_detail_text() {
    let server = Server {
        id: "srv-1".to_string(),
        name: "web-01".to_string(),
        status: "ACTIVE".to_string(),
        ..Default::default()
    };
    let flavor = Flavor {
        id: "flv-small".to_string(),
        name: "m1.small".to_string(),
        vcpus: 1,
        ram: 2048,
        disk: 20,
    };
    let image = Image {
        id: "img-1".to_string(),
        name: "Ubuntu 22.04".to_string(),
        size: 2300,
        tags: vec!["lts".to_string()],
        status: "active".to_string(),
    };

    let text = describe::server(&server, &Dependent::Found(flavor), &Dependent::Found(image));
    assert_snapshot!(text, @r"
    ID: srv-1
    Name: web-01
    Status: ACTIVE
    Flavor:
      Name: m1.small
      RAM: 2048 MB
      vCPUs: 1
      Disk: 20 GB
    Image:
      Name: Ubuntu 22.04
      ID: img-1
      Size: 2300
      Tags: lts
    Networks:
      none
    Attached Volumes:
      none
    ");
}

#[test]
fn test_render_header() {
    let status = StatusLine {
        legend: "(s)ervers (q)uit".to_string(),
        clock: "12:34:56".to_string(),
        project: "dev".to_string(),
    };
    let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();

    terminal
        .draw(|frame| {
            let area = frame.area();
            render_header(frame, area, &status, &Theme::default());
        })
        .unwrap();

    let rows = rows(&terminal);
    assert!(rows[0].contains(" lazystack "));
    assert_eq!(rows[1], "│(s)ervers (q)uit              12:34:56│");
    assert!(rows[2].starts_with("│Project: dev"));
}

#[test]
fn test_render_footer_prefers_notice() {
    let theme = Theme::default();
    let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();

    terminal
        .draw(|frame| {
            let area = frame.area();
            render_footer(frame, area, InputMode::Shortcut, None, &theme);
        })
        .unwrap();
    assert!(rows(&terminal)[0].starts_with(": Command | j/k Navigate | Enter Details | q Quit"));

    let notice = Notice {
        text: "networks: domain 'Nope' not found".to_string(),
        is_error: true,
        since: Instant::now(),
    };
    terminal
        .draw(|frame| {
            let area = frame.area();
            render_footer(frame, area, InputMode::Command, Some(&notice), &theme);
        })
        .unwrap();
    assert!(rows(&terminal)[0].starts_with("networks: domain 'Nope' not found"));
}

#[test]
fn test_render_app_before_any_view() {
    let mut app = fixture_app("dev");
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

    terminal.draw(|frame| app.render(frame)).unwrap();

    assert!(screen_contains(&terminal, "No view selected"));
    assert!(screen_contains(&terminal, "Select an entry with Enter"));
}

#[tokio::test]
async fn test_render_app_with_list_and_detail() {
    let mut app = fixture_app("dev");
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

    press(&mut app, KeyCode::Char('f'));
    terminal.draw(|frame| app.render(frame)).unwrap();
    assert!(screen_contains(&terminal, " Flavors (0) "));
    assert!(screen_contains(&terminal, "Loading..."));

    app.settle().await;
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    terminal.draw(|frame| app.render(frame)).unwrap();

    assert!(screen_contains(&terminal, " Flavors (4) "));
    assert!(screen_contains(&terminal, "  m1.tiny"));
    assert!(screen_contains(&terminal, "▶ m1.small"));
    assert!(screen_contains(&terminal, "ID: flv-small"));
    assert!(screen_contains(&terminal, "RAM: 2048 MB"));
}

#[test]
fn test_render_prompt_with_suggestions() {
    let mut app = fixture_app("dev");
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

    press(&mut app, KeyCode::Char(':'));
    type_text(&mut app, "lo");
    terminal.draw(|frame| app.render(frame)).unwrap();

    assert!(screen_contains(&terminal, ":lo_"));
    assert!(screen_contains(&terminal, "loadbalancers"));
    assert!(screen_contains(&terminal, "Tab Complete"));
}
