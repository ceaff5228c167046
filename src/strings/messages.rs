//! # Messages
//!
//! User-facing texts sent to the chat. Messages go out with the HTML parse mode, so every
//! dynamic value is escaped before it is interpolated.

pub const WEBHOOK_ACK: &str = "OK";
pub const HEALTH_OK: &str = "ربات فعال است!";

pub const UNRECOGNIZED: &str = "دستور نامفهوم. لطفاً یکی از گزینه‌ها رو انتخاب کن یا /start بزن.";

/// Escapes the characters Telegram's HTML mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn skill_list<'a>(skills: impl IntoIterator<Item = &'a str>) -> String {
    skills
        .into_iter()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn welcome<'a>(skills: impl IntoIterator<Item = &'a str>) -> String {
    format!(
        "به ربات مربی فریلنسری خوش اومدی!\nیکی از مهارت‌ها رو انتخاب کن:\n{}",
        skill_list(skills)
    )
}

pub fn project_assigned(skill: &str, project: &str) -> String {
    format!(
        "پروژه {}:\n\n{}\n\nپاسخت رو ارسال کن.",
        escape_html(skill),
        escape_html(project)
    )
}

pub fn mentor_feedback(feedback: &str) -> String {
    format!("بازخورد منتور:\n\n{}", escape_html(feedback))
}

/// Returned by the feedback requester in place of a completion when the call fails.
pub fn feedback_error(err: &str) -> String {
    format!("متأسفانه خطایی رخ داد: {err}")
}

pub fn next_project<'a>(skills: impl IntoIterator<Item = &'a str>) -> String {
    format!("می‌تونی پروژه بعدی رو انتخاب کنی:\n{}", skill_list(skills))
}
