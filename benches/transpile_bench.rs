//! Transpile benchmark
//!
//! Measures parse + print throughput (bytes/sec) over fixture sources of
//! increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use luz::{transpile, ParseOptions};

// =============================================================================
// Test Sources
// =============================================================================

const SIMPLE_SOURCE: &str = r#"
local function add(a: number, b: number): number
    return a + b
end

local result = add(1, 2)
print(result)
"#;

const MEDIUM_SOURCE: &str = r#"
type User = { id: number, name: string, email: string? }

local UserService = {}
UserService.__index = UserService

function UserService.new()
    return setmetatable({ users = {} }, UserService)
end

function UserService:addUser(user: User)
    self.users[user.id] = user
end

function UserService:getUser(id: number): User?
    return self.users[id]
end

local service = UserService.new()
service:addUser({ id = 1, name = "Alice" })
service:addUser({ id = 2, name = "Bob", email = "bob@example.com" })

local alice = service:getUser(1)
if alice then
    print(`found {alice.name}`)
end
"#;

const COMPLEX_SOURCE: &str = r#"
type Handler = (event: string)->(boolean)
type Registry = { [string]: Handler }

local handlers: Registry = {}

local function register(name: string, handler: Handler)
    handlers[name] = handler
end

local function dispatch(name: string, retries: number): boolean
    local handler = handlers[name]
    if handler == nil then
        return false
    end
    for attempt = 1, retries do
        local ok = handler(name)
        if ok then
            return true
        elseif attempt == retries then
            break
        end
    end
    return false
end

register("start", function(event)
    return #event > 0
end)

register("stop", function(event)
    return event ~= ""
end)

local total = 0
for _, name in ipairs({ "start", "stop", "missing" }) do
    if dispatch(name, 3) then
        total += 1
    end
end
print(`dispatched {total}`)
"#;

fn bench_transpile(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpile");

    for (name, source) in [
        ("simple", SIMPLE_SOURCE),
        ("medium", MEDIUM_SOURCE),
        ("complex", COMPLEX_SOURCE),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("with_types", name), source, |b, src| {
            b.iter(|| transpile(black_box(src), ParseOptions::default(), true));
        });
        group.bench_with_input(BenchmarkId::new("strip_types", name), source, |b, src| {
            b.iter(|| transpile(black_box(src), ParseOptions::default(), false));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transpile);
criterion_main!(benches);
