/*!
# The Statement Language

A program is a list of statements, each ending with a semicolon.
Line breaks don't matter. Anything after the last semicolon is ignored.

```text
var x = 0;
label(loop);
draw_char(x, 0, 10);
x += 8;
jump(loop);
```

There are no expressions. Every statement does one thing.

## Operands

An operand is one of:

* a decimal integer from 0 to 255;
* a register, `v[0]` through `v[15]`;
* a variable name declared earlier with `var`.

Registers are the machine's own registers. Variables live in memory,
one byte each, and are loaded into registers as needed. The compiler
borrows low numbered registers for this, starting over at `v[0]` for
every statement, so a value kept in `v[0]`, `v[1]` or `v[2]` can be
overwritten by a statement that uses variables or integers.

## Statements

`var name = value;` declares a byte variable and stores its starting
value. Declaring the same name twice is an error.

`target += value;` adds an integer to a register or variable. The sum
wraps around past 255.

`v[n] = value;` loads an integer into a register. Only registers can be
assigned this way. Use `var` to set a variable's starting value.

`draw_char(x, y, digit);` draws the built-in glyph for the hex digit
`digit` with its top left corner at `x`, `y`. Drawing flips pixels, so
drawing the same glyph twice erases it. Each argument may be any kind
of operand.

`label(name);` marks the position of the next statement. Using the same
name again moves the label.

`jump(name);` continues execution at a label. The label must appear
before the jump; a jump forward is an `UNDEFINED LABEL` error.

Any other statement is skipped without complaint, as is a call to any
name besides `draw_char`, `label` and `jump`.

## Errors

Compilation goes on past errors so that all of them are reported, but
a program with errors is never run.

| Error | Cause |
|---|---|
| `SYNTAX ERROR` | a recognized statement with a malformed operand |
| `OVERFLOW` | an integer larger than 255 |
| `UNDEFINED VARIABLE` | a variable used before its `var` |
| `DUPLICATE DEFINITION` | a second `var` with the same name |
| `UNDEFINED LABEL` | a jump to a label not yet seen |
| `OUT OF MEMORY` | the program and its variables don't fit in memory |

## Where variables go

Variables are stored starting at address 0x200, the same place the code
begins. A program long enough to reach its own variables can overwrite
instructions it has yet to run, or run its variables as instructions.
The compiler warns with `VARIABLE OVERLAPS CODE` for every variable in
this position. The `--vars-after-code` option stores them after the
last instruction instead.

*/
