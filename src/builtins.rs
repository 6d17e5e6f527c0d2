//! Lua standard library namespaces.
//!
//! Queries against these names are answered from this table alone, without
//! touching the project index or the file system.

use crate::symbol::{Symbol, SymbolSet};

pub struct BuiltinNamespace {
    pub name: &'static str,
    pub functions: &'static [&'static str],
    pub fields: &'static [&'static str],
}

pub const BUILTIN_NAMESPACES: &[BuiltinNamespace] = &[
    BuiltinNamespace {
        name: "coroutine",
        functions: &[
            "close", "create", "isyieldable", "resume", "running", "status", "wrap", "yield",
        ],
        fields: &[],
    },
    BuiltinNamespace {
        name: "debug",
        functions: &[
            "debug", "gethook", "getinfo", "getlocal", "getmetatable", "getregistry",
            "getupvalue", "getuservalue", "sethook", "setlocal", "setmetatable", "setupvalue",
            "setuservalue", "traceback", "upvalueid", "upvaluejoin",
        ],
        fields: &[],
    },
    BuiltinNamespace {
        name: "io",
        functions: &[
            "close", "flush", "input", "lines", "open", "output", "popen", "read", "tmpfile",
            "type", "write",
        ],
        fields: &["stderr", "stdin", "stdout"],
    },
    BuiltinNamespace {
        name: "math",
        functions: &[
            "abs", "acos", "asin", "atan", "ceil", "cos", "deg", "exp", "floor", "fmod", "log",
            "max", "min", "modf", "rad", "random", "randomseed", "sin", "sqrt", "tan",
            "tointeger", "type", "ult",
        ],
        fields: &["huge", "maxinteger", "mininteger", "pi"],
    },
    BuiltinNamespace {
        name: "os",
        functions: &[
            "clock", "date", "difftime", "execute", "exit", "getenv", "remove", "rename",
            "setlocale", "time", "tmpname",
        ],
        fields: &[],
    },
    BuiltinNamespace {
        name: "string",
        functions: &[
            "byte", "char", "dump", "find", "format", "gmatch", "gsub", "len", "lower", "match",
            "pack", "packsize", "rep", "reverse", "sub", "unpack", "upper",
        ],
        fields: &[],
    },
    BuiltinNamespace {
        name: "table",
        functions: &["concat", "insert", "move", "pack", "remove", "sort", "unpack"],
        fields: &[],
    },
    BuiltinNamespace {
        name: "utf8",
        functions: &["char", "codepoint", "codes", "len", "offset"],
        fields: &["charpattern"],
    },
];

/// Functions visible in every Lua chunk without a namespace.
pub const GLOBAL_FUNCTIONS: &[&str] = &[
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "load",
    "loadfile", "next", "pairs", "pcall", "print", "rawequal", "rawget", "rawlen", "rawset",
    "require", "select", "setmetatable", "tonumber", "tostring", "type", "xpcall",
];

pub fn namespace(name: &str) -> Option<&'static BuiltinNamespace> {
    BUILTIN_NAMESPACES.iter().find(|ns| ns.name == name)
}

impl BuiltinNamespace {
    pub fn symbols(&self) -> SymbolSet {
        self.functions
            .iter()
            .map(|f| Symbol::function(*f, ""))
            .chain(self.fields.iter().map(|f| Symbol::variable(*f)))
            .collect()
    }
}

/// Contents of the synthetic global-root entry.
pub fn global_symbols() -> SymbolSet {
    BUILTIN_NAMESPACES
        .iter()
        .map(|ns| Symbol::variable(ns.name))
        .chain(GLOBAL_FUNCTIONS.iter().map(|f| Symbol::function(*f, "")))
        .collect()
}
