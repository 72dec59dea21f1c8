//! One emitter per supervisor.
//!
//! | Target       | Directory                              | Per instance                     | Aggregate                       |
//! |--------------|----------------------------------------|----------------------------------|---------------------------------|
//! | launchd      | `Library/LaunchDaemons`                | `{app}-{type}-{num}.plist`       | -                               |
//! | runit        | `service`                              | `{app}-{type}-{num}/{run,log/run,env/*}` | -                       |
//! | systemd      | `etc/systemd/system`                   | `{app}-{type}.{num}.service`     | `{app}.target`                  |
//! | systemd-user | `{home}/.config/systemd/user`          | `{app}-{type}-{num}.service`     | -                               |
//! | sysv         | `etc/init.d`                           | `{app}-{type}-{num}`             | -                               |
//! | upstart      | `etc/init`                             | `{app}-{type}-{num}.conf`        | `{app}-{type}.conf`, `{app}.conf` |

mod launchd;
mod runit;
mod systemd;
mod systemd_user;
mod sysv;
mod upstart;

pub use launchd::Launchd;
pub use runit::Runit;
pub use systemd::Systemd;
pub use systemd_user::SystemdUser;
pub use sysv::Sysv;
pub use upstart::Upstart;
