//! Order summary renderer
//!
//! Renders a [`PrintContext`] as fixed-width plain text for the terminal
//! and for the "copy to clipboard" action of the order screen.

use super::types::PrintContext;

/// Order summary renderer
pub struct OrderSummaryRenderer {
    width: usize,
}

impl OrderSummaryRenderer {
    /// Create a renderer with the given line width in characters
    ///
    /// Narrower than 40 is raised to 40 so the two price columns fit.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(40),
        }
    }

    /// Render the full summary
    pub fn render(&self, ctx: &PrintContext) -> String {
        let mut out = String::new();
        self.render_header(&mut out, ctx);
        self.render_items(&mut out, ctx);
        self.render_paths(&mut out, ctx);
        self.render_warranty(&mut out, ctx);
        out
    }

    fn render_header(&self, out: &mut String, ctx: &PrintContext) {
        self.center(out, &format!("ORDER #{}", ctx.order_number));
        self.center(out, &ctx.order_date);
        self.sep(out, '=');
        self.line(out, &format!("Patient: {}", ctx.patient_name));
        if let Some(phone) = &ctx.patient_phone {
            self.line(out, &format!("Phone: {}", phone));
        }
        if let Some(doctor) = &ctx.doctor {
            self.line(out, &format!("Doctor: {}", doctor));
        }
        if let Some(employee) = &ctx.employee {
            self.line(out, &format!("Staff: {}", employee));
        }
        self.sep(out, '-');
    }

    fn render_items(&self, out: &mut String, ctx: &PrintContext) {
        self.pair(out, &ctx.frame_description, ctx.frame_list_price);
        if !ctx.uses_own_frame && ctx.you_saved != 0.0 {
            self.pair(out, "  Frame after allowance", ctx.final_frame_price);
        }
        for lens in &ctx.lenses {
            self.pair(out, &format!("{}: {}", lens.category, lens.name), lens.regular_price);
        }
        if ctx.material_copay != 0.0 {
            self.pair(out, "Material copay", ctx.material_copay);
        }
        if ctx.other_charges_adjustment != 0.0 {
            self.pair(out, "Adjustment", ctx.other_charges_adjustment);
        }
        if let Some(kind) = &ctx.warranty_type {
            self.pair(out, &format!("Warranty ({})", kind), ctx.warranty_price);
        }
        for charge in &ctx.charges {
            self.pair(out, &charge.name, charge.price);
        }
        self.sep(out, '-');
    }

    fn render_paths(&self, out: &mut String, ctx: &PrintContext) {
        let (r, i) = (&ctx.regular, &ctx.insurance);
        self.columns(out, "", "Regular", "Insurance");
        self.amounts(out, "Subtotal", r.subtotal, i.subtotal);
        self.amounts(out, "Sales tax", r.sales_tax, i.sales_tax);
        self.amounts(out, "You pay", r.you_pay, i.you_pay);
        self.amounts(out, "Final price", r.final_price, i.final_price);
        if r.percent_adjustment != 0.0 || i.percent_adjustment != 0.0 {
            self.amounts(out, "Percent adj.", r.percent_adjustment, i.percent_adjustment);
        }
        self.amounts(out, "Total", r.total_balance, i.total_balance);
        self.amounts(out, "Paid today", r.paid_today, i.paid_today);
        self.amounts(out, "Balance due", r.balance_due, i.balance_due);
        if ctx.you_saved != 0.0 {
            self.sep(out, '-');
            self.pair(out, "You saved", ctx.you_saved);
        }
    }

    fn render_warranty(&self, out: &mut String, ctx: &PrintContext) {
        let Some(disclosure) = &ctx.warranty_disclosure else {
            return;
        };
        self.sep(out, '-');
        self.line(out, "Warranty replacement copays:");
        self.pair(out, "  Frame", disclosure.frame_replacement_copay);
        self.pair(out, "  Lenses", disclosure.lens_replacement_copay);
    }

    // === Layout helpers ===

    fn line(&self, out: &mut String, s: &str) {
        out.push_str(s);
        out.push('\n');
    }

    fn sep(&self, out: &mut String, c: char) {
        out.extend(std::iter::repeat_n(c, self.width));
        out.push('\n');
    }

    fn center(&self, out: &mut String, s: &str) {
        let len = s.chars().count();
        let pad = self.width.saturating_sub(len) / 2;
        out.extend(std::iter::repeat_n(' ', pad));
        self.line(out, s);
    }

    /// Label left, amount right
    fn pair(&self, out: &mut String, label: &str, amount: f64) {
        let amount = money(amount);
        let room = self.width.saturating_sub(amount.len() + 1);
        let label = truncate(label, room);
        let pad = self.width.saturating_sub(label.chars().count() + amount.len());
        out.push_str(&label);
        out.extend(std::iter::repeat_n(' ', pad));
        self.line(out, &amount);
    }

    /// Label plus regular and insurance amounts
    fn amounts(&self, out: &mut String, label: &str, regular: f64, insurance: f64) {
        self.columns(out, label, &money(regular), &money(insurance));
    }

    /// Label plus two right-aligned columns
    fn columns(&self, out: &mut String, label: &str, a: &str, b: &str) {
        const COL: usize = 12;
        let label_room = self.width.saturating_sub(COL * 2);
        let label = truncate(label, label_room);
        out.push_str(&format!(
            "{:<lw$}{:>cw$}{:>cw$}",
            label,
            a,
            b,
            lw = label_room,
            cw = COL
        ));
        out.push('\n');
    }
}

impl Default for OrderSummaryRenderer {
    fn default() -> Self {
        Self::new(48)
    }
}

/// `$1,234.50` / `-$30.00`
pub fn money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}
