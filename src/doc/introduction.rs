/*!
# Introductory Tutorial for CHIP-8 Lang

Begin by opening a terminal and running the executable with a program
image. Images are raw bytes loaded at address 0x200, the way they were
on the original hardware.

<pre><code>&nbsp;$ chip8 --rom pong.ch8
</code></pre>

The display takes over the terminal. Each terminal character cell shows
two machine pixels stacked vertically, so the 64×32 screen needs a
terminal at least 64 columns wide and 17 rows tall. The bottom row is a
status line with the program counter and both timers.

## The keypad

The machine has sixteen keys labelled with hex digits. Press `0`-`9` and
`a`-`f` on your keyboard. Terminals report a key press but never its
release, so a key stays down for a few frames after you press it.
Holding a key down works because the terminal repeats it.

## Pausing and the debugger

Press Escape or CTRL-C to pause. The display is left in place and a
prompt appears below the status line.

<pre><code>&nbsp;  [0x2F6] 0x6A02 ; LD VA, 0x02
&nbsp;> regs
&nbsp;  PC 0x2F6  I 0x2EA  SP 1  DT 0  ST 0
&nbsp;  V0 00 V1 0A V2 1F V3 00 V4 00 V5 00 V6 00 V7 00
&nbsp;  V8 00 V9 00 VA 02 VB 0C VC 3F VD 0C VE 00 VF 00
&nbsp;> step 3
&nbsp;> run
</code></pre>

`step` executes single instructions and prints the one it stopped at.
`list` disassembles around the program counter. `mem 0x300 16` dumps
memory. `save` takes a snapshot of the entire machine and `restore`
rewinds to it as often as you like. `key 5 down` presses a key while
paused. `screen` redraws the display. `quirks` shows or changes the
compatibility options. `run` continues and `quit` exits.

When a program faults, for example returning from a subroutine that
was never called, execution pauses in the debugger with the error and
the address of the instruction that caused it. Nothing of the faulting
instruction has happened yet, so `regs` shows the state just before it.

## Compiling source

Programs can also be written in the statement language. See the
language chapter for what it accepts.

<pre><code>&nbsp;$ chip8 --source count.c8s
</code></pre>

Compile errors are printed with the statement number and the columns
of the offending text, and nothing runs. Warnings, such as a variable
stored on top of the code, are printed but the program still runs. Add
`--disassemble` to see what the compiler produced instead of running
it, and `--vars-after-code` to move variable storage out of the way of
the code.

## Options

| Flag | Effect |
|---|---|
| `--cycles-per-frame N` | instructions executed between frames |
| `--fps N` | frames per second, which is also the timer rate |
| `--legacy-increment` | `LD [I]` and `LD V, [I]` advance `I` |
| `--no-anti-flicker` | redraw on frames where a sprite collided |
| `--seed N` | repeatable random numbers |
| `--debug` | start paused in the debugger |
| `--steps N` | run headless for N instructions and print the registers |
| `-v` | more logging on stderr, repeat for more |

*/
