//! Command-line interface definition using clap.
//!
//! [`Args`] mirrors the library configuration: per-kind include/exclude
//! flags become [`TypeRules`], repeatable target options become
//! [`Targets`](crate::core::filter::Targets), and `-v` counts become a
//! [`Verbosity`].

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{ExtractConfig, Verbosity};
use crate::core::filter::{FilterConfig, TypeRule, TypeRules};
use crate::record::MessageKind;

/// Get attachment URLs from DiscordMonitor verbose logs.
///
/// 'group', 'guild', 'channel' and 'user' can be given multiple times to add
/// targets. Not specifying any target outputs every attachment found.
#[derive(Parser, Debug, Clone)]
#[command(name = "attachlog")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    attachlog in.log out.csv
        Dump any and all found attachment metadata to CSV.
    attachlog -g group1 -g group2 -G guild -u user in.log out.csv
        Write attachment metadata meeting at least one of the targets.
    attachlog --group= in.log out.csv
        Target unnamed groups.
    attachlog --include-dm --include-group in.log out.csv
        Only DM and group messages. Equivalent to --exclude-guild.
    attachlog --exclude-guild -u user -v in.log out.csv
        DM and group messages from one user, printing each message id.
    attachlog -vv in.log -
        Debug output (matched records and rows) on stderr, CSV on stdout.")]
pub struct Args {
    /// DiscordMonitor-generated log file to parse
    pub logfile: PathBuf,

    /// CSV output file path ('-' for standard output)
    pub outcsv: String,

    /// Only output guild messages (combinable with other --include-*)
    #[arg(long, conflicts_with = "exclude_guild")]
    pub include_guild: bool,

    /// Never output guild messages
    #[arg(long)]
    pub exclude_guild: bool,

    /// Only output direct messages (combinable with other --include-*)
    #[arg(long, conflicts_with = "exclude_dm")]
    pub include_dm: bool,

    /// Never output direct messages
    #[arg(long)]
    pub exclude_dm: bool,

    /// Only output group messages (combinable with other --include-*)
    #[arg(long, conflicts_with = "exclude_group")]
    pub include_group: bool,

    /// Never output group messages
    #[arg(long)]
    pub exclude_group: bool,

    /// Group name to target (group names can be blank: target them with --group=)
    #[arg(short = 'g', long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Guild name to target
    #[arg(short = 'G', long = "guild", value_name = "GUILD")]
    pub guilds: Vec<String>,

    /// Channel name to target
    #[arg(short = 'c', long = "channel", value_name = "CHANNEL")]
    pub channels: Vec<String>,

    /// User name to target
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub users: Vec<String>,

    /// Input file encoding (e.g. utf-8, windows-1252, shift_jis)
    #[arg(long, value_name = "ENCODING")]
    pub read_encoding: Option<String>,

    /// Verbosity, repeat to increase: 0 silent, 1 message ids, 2 debug
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn rule(include: bool, exclude: bool) -> TypeRule {
    match (include, exclude) {
        (true, _) => TypeRule::Include,
        (false, true) => TypeRule::Exclude,
        (false, false) => TypeRule::Any,
    }
}

impl Args {
    /// Returns the per-kind rules selected by the include/exclude flags.
    pub fn type_rules(&self) -> TypeRules {
        TypeRules::default()
            .with(
                MessageKind::Guild,
                rule(self.include_guild, self.exclude_guild),
            )
            .with(
                MessageKind::DirectMessage,
                rule(self.include_dm, self.exclude_dm),
            )
            .with(
                MessageKind::Group,
                rule(self.include_group, self.exclude_group),
            )
    }

    /// Builds the library configuration for this invocation.
    pub fn to_config(&self) -> ExtractConfig {
        let mut filter = FilterConfig {
            types: self.type_rules(),
            ..FilterConfig::default()
        };
        filter.targets.groups.extend(self.groups.iter().cloned());
        filter.targets.guilds.extend(self.guilds.iter().cloned());
        filter.targets.channels.extend(self.channels.iter().cloned());
        filter.targets.users.extend(self.users.iter().cloned());

        ExtractConfig {
            encoding: self.read_encoding.clone(),
            verbosity: Verbosity::from_count(self.verbose),
            filter,
        }
    }
}
