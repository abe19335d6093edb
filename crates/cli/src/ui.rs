use crate::style::Style;

pub struct Ui {
    style: Style,
    width: usize,
}

impl Ui {
    pub fn new(style: Style) -> Self {
        Self { style, width: 40 }
    }

    pub fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    pub fn header(&self, title: &str) -> Vec<String> {
        vec![self.rule(), title.to_string(), self.rule()]
    }

    pub fn kv(&self, key: &str, value: &str) -> String {
        let key_pad = 18usize;
        format!("{key:<key_pad$}: {value}")
    }

    pub fn ok_line(&self, message: &str) -> String {
        format!("{} {}", self.style.ok(), message)
    }

    pub fn warn_line(&self, message: &str) -> String {
        format!("{} {}", self.style.warn(), message)
    }

    pub fn info_line(&self, message: &str) -> String {
        format!("{} {}", self.style.arrow(), message)
    }

    pub fn list_item(&self, label: &str, value: Option<&str>) -> String {
        let label_width = 30usize;
        let bullet = self.style.bullet();

        match value {
            Some(value) => {
                let used = label.chars().count();
                let dots = ".".repeat(label_width.saturating_sub(used));
                format!("  {bullet} {label}{dots} {value}")
            }
            None => format!("  {bullet} {label}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Ui;
    use crate::style::Style;

    #[test]
    fn kv_pads_keys() {
        let ui = Ui::new(Style::plain());
        assert_eq!(ui.kv("rows inserted", "2"), "rows inserted     : 2");
    }

    #[test]
    fn list_item_dots_up_to_the_value() {
        let ui = Ui::new(Style::plain());
        assert_eq!(ui.list_item("users", None), "  • users");
        assert_eq!(
            ui.list_item("users", Some("12")),
            format!("  • users{} 12", ".".repeat(25))
        );
    }
}
