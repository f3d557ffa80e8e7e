//! Interactive text menu.
//!
//! The menu is a fixed dispatch table of [`MenuAction`]s. [`Session::run`] loops
//! over prompt → dispatch until the user quits or input ends. Domain errors are
//! shown to the user and the loop carries on; only IO errors end the session.

use std::io::{BufRead, Write};

use storefront_core::ProductId;
use storefront_store::{OrderLine, Store};

const RULE: &str = "------";

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ListProducts,
    ShowTotal,
    MakeOrder,
    Quit,
}

impl MenuAction {
    /// Menu entries in display order.
    pub const ALL: [MenuAction; 4] = [
        MenuAction::ListProducts,
        MenuAction::ShowTotal,
        MenuAction::MakeOrder,
        MenuAction::Quit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuAction::ListProducts => "1",
            MenuAction::ShowTotal => "2",
            MenuAction::MakeOrder => "3",
            MenuAction::Quit => "4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ListProducts => "List all products in store",
            MenuAction::ShowTotal => "Show total amount in store",
            MenuAction::MakeOrder => "Make an order",
            MenuAction::Quit => "Quit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == key)
    }
}

/// One interactive session over a store.
pub struct Session<R, W> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Run the menu loop until the user quits or input is exhausted.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Please choose a number: ")? else {
                break;
            };
            let flow = match MenuAction::from_key(&choice) {
                Some(action) => self.dispatch(action)?,
                None => {
                    writeln!(self.output, "Error with your choice! Try again!")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        writeln!(self.output, "Bye!")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn dispatch(&mut self, action: MenuAction) -> anyhow::Result<Flow> {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::ListProducts => self.list_products(),
            MenuAction::ShowTotal => self.show_total(),
            MenuAction::MakeOrder => self.make_order(),
            MenuAction::Quit => Ok(Flow::Quit),
        }
    }

    fn print_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "   Store Menu")?;
        writeln!(self.output, "   ----------")?;
        for action in MenuAction::ALL {
            writeln!(self.output, "{}. {}", action.key(), action.label())?;
        }
        Ok(())
    }

    fn list_products(&mut self) -> anyhow::Result<Flow> {
        let listing = self.store.all_products();
        if listing.is_empty() {
            writeln!(self.output, "No products available.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "{RULE}")?;
        for (n, description) in listing.iter().enumerate() {
            writeln!(self.output, "{}. {description}", n + 1)?;
        }
        writeln!(self.output, "{RULE}")?;
        Ok(Flow::Continue)
    }

    fn show_total(&mut self) -> anyhow::Result<Flow> {
        writeln!(
            self.output,
            "Total of {} items in store",
            self.store.total_quantity()
        )?;
        Ok(Flow::Continue)
    }

    fn make_order(&mut self) -> anyhow::Result<Flow> {
        // Numbering is fixed for the whole order, even if a product sells out.
        let choices: Vec<ProductId> = self
            .store
            .active_products()
            .iter()
            .map(|p| p.id_typed())
            .collect();
        self.list_products()?;
        if choices.is_empty() {
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "When you want to finish order, enter empty text.")?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_order_line(&choices)? {
            lines.push(line);
            match self.store.calculate_subtotal(&lines) {
                Ok(subtotal) => {
                    writeln!(self.output, "Product added to list! Subtotal: {subtotal}")?;
                }
                Err(err) => {
                    lines.pop();
                    tracing::warn!(error = %err, "order line rejected");
                    writeln!(self.output, "Error: {err}")?;
                }
            }
        }

        if lines.is_empty() {
            writeln!(self.output, "No products ordered.")?;
            return Ok(Flow::Continue);
        }

        match self.store.place_order(&lines) {
            Ok(receipt) => {
                for line in receipt.lines() {
                    writeln!(
                        self.output,
                        "  {} x {}: {}",
                        line.quantity, line.name, line.charge
                    )?;
                }
                writeln!(self.output, "Order made! Total payment: {}", receipt.total())?;
            }
            Err(err) => {
                tracing::warn!(error = %err, "order rejected");
                writeln!(self.output, "Error while making order! {err}")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Ask for one product number and amount. `None` once the user is done.
    fn read_order_line(&mut self, choices: &[ProductId]) -> anyhow::Result<Option<OrderLine>> {
        loop {
            let Some(choice) = self.prompt("Which product # do you want? ")? else {
                return Ok(None);
            };
            if choice.is_empty() {
                return Ok(None);
            }
            let product_id = match choice.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => choices[n - 1],
                _ => {
                    writeln!(self.output, "Error: no product number {choice}")?;
                    continue;
                }
            };

            let Some(amount) = self.prompt("What amount do you want? ")? else {
                return Ok(None);
            };
            match amount.parse::<u64>() {
                Ok(quantity) => return Ok(Some(OrderLine::new(product_id, quantity))),
                Err(_) => {
                    writeln!(self.output, "Error: amount must be a whole number")?;
                }
            }
        }
    }

    /// Print `text` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
