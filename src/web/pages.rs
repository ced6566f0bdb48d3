//! Server-rendered pages. Templates are compiled into the binary and autoescaped.

use crate::error::Result;
use crate::logic::RegistrationFlow;
use crate::models::{Countdown, Deadline, Field, PositionCategory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("landing.html", include_str!("../../templates/landing.html")),
    ("register.html", include_str!("../../templates/register.html")),
];

#[derive(Serialize)]
struct PositionOption {
    code: &'static str,
    name: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct CategoryGroup {
    label: &'static str,
    positions: Vec<PositionOption>,
}

pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Landing view with the countdown as of page load.
    pub fn landing(&self, deadline: Deadline, countdown: Countdown) -> Result<String> {
        let mut context = Context::new();
        context.insert("deadline_ms", &deadline.unix_millis());
        context.insert("countdown", &countdown);
        Ok(self.tera.render("landing.html", &context)?)
    }

    /// Registration view for whatever state the flow is in.
    pub fn registration(&self, flow: &RegistrationFlow, now: DateTime<Utc>) -> Result<String> {
        let draft = flow.draft();
        // Every field gets an entry so the template can test for an empty message.
        let errors: BTreeMap<&str, &str> = Field::ALL
            .into_iter()
            .map(|f| (f.key(), flow.errors().get(f).unwrap_or_default()))
            .collect();
        let categories: Vec<CategoryGroup> = PositionCategory::ALL
            .into_iter()
            .map(|category| CategoryGroup {
                label: category.label(),
                positions: category
                    .positions()
                    .map(|p| PositionOption {
                        code: p.code(),
                        name: p.name(),
                        selected: draft.position == p.code(),
                    })
                    .collect(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("state", &flow.state());
        context.insert("shows_form", &flow.shows_form());
        context.insert("draft", draft);
        context.insert("errors", &errors);
        context.insert("categories", &categories);
        context.insert("overlay_visible", &flow.overlay_visible(now));
        context.insert(
            "overlay_ms",
            &u64::try_from(flow.overlay_remaining(now).as_millis()).unwrap_or_default(),
        );
        Ok(self.tera.render("register.html", &context)?)
    }
}
