use datepick_core::config::{PickerConfig, clamp_months};

/// Interactive demo of every picker
/// Values from the environment (DATEPICK_*) are used unless
/// overridden here
#[derive(clap::Args, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct DemoArgs {
    /// Months shown side by side in the two-month range section.
    /// Clamped to 1..=6
    #[arg(long, short)]
    pub months: Option<usize>,

    /// Use a 24-hour clock in the date-time sections
    #[arg(long)]
    pub hour24: bool,

    /// Hide the time row in the default date-time section
    #[arg(long, short)]
    pub date_only: bool,
}

impl DemoArgs {
    pub fn apply(&self, mut config: PickerConfig) -> PickerConfig {
        if let Some(months) = self.months {
            config.months = clamp_months(months);
        }
        if self.hour24 {
            config.hour12 = false;
        }
        if self.date_only {
            config.show_time = false;
        }
        config
    }
}

pub async fn handle_demo(args: DemoArgs) -> i32 {
    let config = args.apply(PickerConfig::from_env());
    match datepick_tui::tui_main(config).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("datepick demo failed: {}", e);
            1
        }
    }
}
