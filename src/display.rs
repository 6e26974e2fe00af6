use std::fmt::Write;

use crate::models::server::ServerStatus;
use crate::stats::{Achievement, Stat};

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<10} {}", label, value);
}

pub fn render_status(host: &str, port: u16, status: &ServerStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:{}", host, port);

    if let Some(motd) = &status.motd {
        line(&mut out, "motd", motd);
    }
    if let Some(version) = &status.version {
        line(&mut out, "version", version);
    }
    line(&mut out, "software", &status.software);
    if let Some(game_type) = &status.game_type {
        line(&mut out, "type", game_type);
    }
    if let Some(map) = &status.map {
        line(&mut out, "map", map);
    }
    if let Some(host) = &status.host {
        line(&mut out, "address", &format!("{}:{}", host, status.port));
    }
    line(&mut out, "players", &format!("{}/{}", status.current, status.max));

    if !status.players.is_empty() {
        line(&mut out, "online", &status.players.join(", "));
    }
    if !status.plugins.is_empty() {
        line(&mut out, "plugins", &status.plugins.join(", "));
    }
    out
}

pub fn render_stats(stats: &[Stat]) -> String {
    let width = stats.iter().map(|stat| stat.name.len()).max().unwrap_or(0);
    stats.iter().fold(String::new(), |mut out, stat| {
        let _ = writeln!(out, "{:<width$}  {}", stat.name, stat.value, width = width);
        out
    })
}

pub fn render_achievements(achievements: &[Achievement]) -> String {
    achievements.iter().fold(String::new(), |mut out, achievement| {
        let mark = if achievement.has { "x" } else { " " };
        let _ = write!(out, "[{}] {}", mark, achievement.name);
        if achievement.value > 1 {
            let _ = write!(out, " ({})", achievement.value);
        }
        out.push('\n');
        out
    })
}

pub fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().fold(String::new(), |mut out, item| {
        let _ = writeln!(out, "{}", item.as_ref());
        out
    })
}
