// SPDX-License-Identifier: MPL-2.0
use payprompt::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        title: args.opt_value_from_str("--title").unwrap_or(None),
        message: args.opt_value_from_str("--message").unwrap_or(None),
        amount: args.opt_value_from_str("--amount").unwrap_or(None),
        rates_file: args.opt_value_from_str("--rates-file").unwrap_or(None),
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or(None),
        i18n_dir: args.opt_value_from_str("--i18n-dir").unwrap_or(None),
    };

    app::run(flags)
}
