use std::path::Path;
use std::path::PathBuf;

use crate::NodeId;
use crate::NodeKind;
use crate::Tree;

pub(crate) const VHOST_CONF: &str = r"
# Test VirtualHost

<VirtualHost *:80  *:443>
    ServerAdmin postmaster@example.com
    ServerName example.com
    ServerAlias www.example.com example.example.com
    ServerAlias x.example.com
    DocumentRoot /usr/local/apache/htdocs/example.com

    Command1 first
    Command1 second

    <IfModule mod_ssl.c>
        Command1 nested
        SSLEngine on
        SSLCertificateFile /etc/letsencrypt/live/example.com/fullchain.pem
        SSLCertificateKeyFile /etc/letsencrypt/live/example.com/privkey.pem
        SSLCertificateChainFile /etc/letsencrypt/live/example.com/chain.pem
    </IfModule mod_ssl.c>
</VirtualHost>
";

pub(crate) const TWO_VHOSTS_CONF: &str = "<VirtualHost *:80>
ServerName example.com
ServerAlias www.example.com
DocumentRoot /var/www/example
</VirtualHost>
<IfModule mod_ssl.c>
<VirtualHost *:443>
ServerName example.com
SSLEngine on
DocumentRoot /var/www/example-ssl
</VirtualHost>
</IfModule>
<VirtualHost *:80>
ServerName other.org
</VirtualHost>
";

pub(crate) const SIMPLE_VHOST: &str = "<VirtualHost *:80>\nServerName a.com\n</VirtualHost>\n";

/// Write `content` to `dir/name`, creating parent directories.
pub(crate) fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)
			.unwrap_or_else(|e| panic!("create_dir_all {}: {e}", parent.display()));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
	path
}

/// One entry per node in document order: nesting depth and the parsed fields
/// that must survive a dump and re-parse.
pub(crate) fn shape(tree: &Tree) -> Vec<(usize, NodeKind)> {
	tree.descendants()
		.map(|id| (tree.depth(id), tree[id].kind().clone()))
		.collect()
}

/// First node named `name` anywhere below `id`.
pub(crate) fn find(tree: &Tree, id: NodeId, name: &str) -> NodeId {
	tree.first(id, name, true)
		.unwrap_or_else(|| panic!("`{name}` not found"))
}

/// Argument strings of `ids`, in order.
pub(crate) fn args_of(tree: &Tree, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
	ids.into_iter()
		.map(|id| tree[id].args().unwrap_or_default().to_string())
		.collect()
}
