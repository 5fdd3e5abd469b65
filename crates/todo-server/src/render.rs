//! Server-side HTML rendering of the task list page

use todomatic_core::list::{FocusTarget, TaskList};
use todomatic_core::task::{Task, TaskFilter, TaskId};

use crate::view::{EditSession, ItemMode};

const STYLE: &str = "\
.visually-hidden{position:absolute!important;height:1px;width:1px;overflow:hidden;clip:rect(1px,1px,1px,1px);white-space:nowrap}\
.todoapp{max-width:40rem;margin:2rem auto;font-family:sans-serif}\
.btn-group{display:flex;gap:.5rem}\
.btn-group form{display:inline}\
.todo{list-style:none;margin:1rem 0}\
.alert{color:#b00020}\
[aria-pressed=true]{text-decoration:underline}";

/// What one render of the page needs
pub struct PageView<'a> {
    pub list: &'a TaskList,
    pub edit: &'a EditSession,
    pub add_draft: &'a str,
    pub focus: Option<&'a FocusTarget>,
    pub alert: Option<&'a str>,
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Path segment for a task id inside a form action
fn id_segment(id: &TaskId) -> String {
    escape(&urlencoding::encode(id.as_str()))
}

fn autofocus(on: bool) -> &'static str {
    if on {
        " autofocus"
    } else {
        ""
    }
}

pub fn render_page(page: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>TodoMatic</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"todoapp stack-large\">\n<h1>TodoMatic</h1>\n");

    html.push_str(&render_add_form(page.add_draft));

    if let Some(alert) = page.alert {
        html.push_str(&format!(
            "<p role=\"alert\" class=\"alert\">{}</p>\n",
            escape(alert)
        ));
    }

    html.push_str("<div class=\"filters btn-group stack-exception\">\n");
    for filter in TaskFilter::ALL {
        html.push_str(&render_filter_button(filter, filter == page.list.filter()));
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<h2 id=\"list-heading\" tabindex=\"-1\"{}>{}</h2>\n",
        autofocus(page.focus == Some(&FocusTarget::ListHeading)),
        escape(&page.list.remaining_count_text())
    ));

    html.push_str(
        "<ul role=\"list\" class=\"todo-list stack-large stack-exception\" aria-labelledby=\"list-heading\">\n",
    );
    for task in page.list.visible_tasks() {
        let item = match page.edit.mode(&task.id) {
            ItemMode::View => render_view_item(task, page.focus),
            ItemMode::Edit { draft } => render_edit_item(task, &draft, page.focus),
        };
        html.push_str(&item);
    }
    html.push_str("</ul>\n</div>\n</body>\n</html>\n");
    html
}

fn render_add_form(draft: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/tasks\">\n\
         <h2 class=\"label-wrapper\"><label for=\"new-todo-input\" class=\"label__lg\">What needs to be done?</label></h2>\n\
         <input type=\"text\" id=\"new-todo-input\" class=\"input input__lg\" name=\"text\" autocomplete=\"off\" value=\"{}\" required>\n\
         <button type=\"submit\" class=\"btn btn__primary btn__lg\">Add</button>\n\
         </form>\n",
        escape(draft)
    )
}

fn render_filter_button(filter: TaskFilter, pressed: bool) -> String {
    format!(
        "<form method=\"post\" action=\"/filter/{name}\">\
         <button type=\"submit\" class=\"btn toggle-btn\" aria-pressed=\"{pressed}\">\
         <span class=\"visually-hidden\">Show </span><span>{name}</span>\
         <span class=\"visually-hidden\"> tasks</span></button></form>\n",
        name = filter.name(),
    )
}

fn render_view_item(task: &Task, focus: Option<&FocusTarget>) -> String {
    let id = escape(task.id.as_str());
    let path = id_segment(&task.id);
    let name = escape(&task.name);
    let checked = if task.completed { " checked" } else { "" };
    let focus_edit = matches!(focus, Some(FocusTarget::EditButton(target)) if target == &task.id);

    format!(
        "<li class=\"todo\"><div class=\"stack-small\">\n\
         <form method=\"post\" action=\"/tasks/{path}/toggle\" class=\"c-cb\">\
         <input id=\"{id}\" type=\"checkbox\"{checked} onchange=\"this.form.submit()\">\
         <label class=\"todo-label\" for=\"{id}\">{name}</label>\
         <noscript><button type=\"submit\" class=\"btn\">Toggle <span class=\"visually-hidden\">{name}</span></button></noscript>\
         </form>\n\
         <div class=\"btn-group\">\
         <form method=\"post\" action=\"/tasks/{path}/edit\">\
         <button type=\"submit\" class=\"btn\"{focus}>Edit <span class=\"visually-hidden\">{name}</span></button></form>\
         <form method=\"post\" action=\"/tasks/{path}/delete\">\
         <button type=\"submit\" class=\"btn btn__danger\">Delete <span class=\"visually-hidden\">{name}</span></button></form>\
         </div>\n</div></li>\n",
        focus = autofocus(focus_edit),
    )
}

fn render_edit_item(task: &Task, draft: &str, focus: Option<&FocusTarget>) -> String {
    let id = escape(task.id.as_str());
    let path = id_segment(&task.id);
    let name = escape(&task.name);
    let focus_field = matches!(focus, Some(FocusTarget::EditField(target)) if target == &task.id);

    format!(
        "<li class=\"todo\">\
         <form method=\"post\" action=\"/tasks/{path}/save\" class=\"stack-small\">\n\
         <div class=\"form-group\">\
         <label class=\"todo-label\" for=\"{id}\">New name for {name}</label>\
         <input id=\"{id}\" class=\"todo-text\" type=\"text\" name=\"name\" value=\"{draft}\" required{focus}>\
         </div>\n\
         <div class=\"btn-group\">\
         <button type=\"submit\" formaction=\"/tasks/{path}/cancel\" formnovalidate class=\"btn todo-cancel\">\
         Cancel <span class=\"visually-hidden\">renaming {name}</span></button>\
         <button type=\"submit\" class=\"btn btn__primary todo-edit\">\
         Save <span class=\"visually-hidden\">new name for {name}</span></button>\
         </div>\n</form></li>\n",
        draft = escape(draft),
        focus = autofocus(focus_field),
    )
}
