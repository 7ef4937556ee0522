use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub type ItemHandler = Box<dyn FnMut(&mut dyn BufRead, &mut dyn Write) -> io::Result<Flow>>;

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub handler: ItemHandler,
}

pub struct Menu {
    title: String,
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn register_item(&mut self, key: &str, label: &str, handler: ItemHandler) {
        self.items.push(MenuItem {
            key: key.to_string(),
            label: label.to_string(),
            handler,
        });
    }

    pub fn run(&mut self, reader: &mut dyn BufRead, writer: &mut dyn Write) -> io::Result<()> {
        let prompt = format!("Choose an option ({}): ", self.key_range());
        let invalid = format!(
            "Invalid choice. Please enter a number between {}.",
            self.key_range().replace('-', " and ")
        );
        loop {
            writeln!(writer, "\n{}", self.title)?;
            for item in &self.items {
                writeln!(writer, "{}. {}", item.key, item.label)?;
            }
            let choice = match read_line(&mut *reader, &mut *writer, &prompt)? {
                Some(choice) => choice,
                None => return Ok(()),
            };
            match self
                .items
                .iter_mut()
                .find(|item| item.key == choice.trim())
            {
                Some(item) => match (item.handler)(&mut *reader, &mut *writer)? {
                    Flow::Continue => {}
                    Flow::Exit => return Ok(()),
                },
                None => writeln!(writer, "{invalid}")?,
            }
        }
    }

    fn key_range(&self) -> String {
        match (self.items.first(), self.items.last()) {
            (Some(first), Some(last)) if first.key != last.key => {
                format!("{}-{}", first.key, last.key)
            }
            (Some(first), _) => first.key.clone(),
            (None, _) => String::new(),
        }
    }
}

pub fn read_line(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{prompt}")?;
    writer.flush()?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn exit_item() -> ItemHandler {
        Box::new(|_reader, _writer| Ok(Flow::Exit))
    }

    #[test]
    fn dispatches_to_matching_item_then_returns_to_menu() {
        let mut menu = Menu::new("--- Menu ---");
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            menu.register_item(
                "1",
                "Count",
                Box::new(move |_reader, _writer| {
                    hits.set(hits.get() + 1);
                    Ok(Flow::Continue)
                }),
            );
        }
        menu.register_item("2", "Exit", exit_item());

        let mut input = Cursor::new("1\n1\n2\n");
        let mut output = Vec::new();
        menu.run(&mut input, &mut output).unwrap();
        assert_eq!(hits.get(), 2);

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("--- Menu ---"));
        assert!(rendered.contains("1. Count"));
        assert!(rendered.contains("Choose an option (1-2): "));
    }

    #[test]
    fn unknown_choice_reprompts_without_dispatch() {
        let mut menu = Menu::new("--- Menu ---");
        menu.register_item(
            "1",
            "Never",
            Box::new(|_reader, _writer| panic!("should not dispatch")),
        );
        menu.register_item("2", "Exit", exit_item());

        let mut input = Cursor::new("9\nabc\n2\n");
        let mut output = Vec::new();
        menu.run(&mut input, &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert_eq!(
            rendered
                .matches("Invalid choice. Please enter a number between 1 and 2.")
                .count(),
            2
        );
        assert_eq!(rendered.matches("--- Menu ---").count(), 3);
    }

    #[test]
    fn choice_matching_ignores_surrounding_whitespace() {
        let mut menu = Menu::new("--- Menu ---");
        menu.register_item("1", "Exit", exit_item());
        let mut input = Cursor::new("  1  \n");
        let mut output = Vec::new();
        menu.run(&mut input, &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(!rendered.contains("Invalid choice"));
        assert_eq!(rendered.matches("--- Menu ---").count(), 1);
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let mut menu = Menu::new("--- Menu ---");
        menu.register_item("1", "Exit", exit_item());
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        menu.run(&mut input, &mut output).unwrap();
    }
}
