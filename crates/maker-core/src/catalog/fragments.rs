//! The Makefile fragments, in emission order

use super::{Fragment, Predicate, Span};
use crate::toggles::Toggle;

const BENCH_FLAGS: Span = Span::When(Predicate::On(Toggle::Bench), "-bench=. -benchmem ");

/// Every fragment a generated Makefile can contain.
///
/// Order is part of the output contract: formatting, then linting, then vet,
/// then build; `help` always closes the file.
pub static CATALOG: &[Fragment] = &[
    Fragment {
        name: "preamble",
        when: Predicate::Always,
        body: &[Span::Text(concat!(
            ".DEFAULT_GOAL := help\n",
            "\n",
            "BIN = $(CURDIR)/bin\n",
            "VERSION ?= $(shell git describe --tags --always --dirty --match=v* 2> /dev/null || echo v0)\n",
            "\n",
            "$(BIN):\n",
            "\t@mkdir -p $@\n",
            "\n",
            ".PHONY: phony\n",
        ))],
    },
    Fragment {
        name: "fmt",
        when: Predicate::Always,
        body: &[Span::Text("fmt: phony ## format the codes\n\t@go fmt ./...\n")],
    },
    Fragment {
        name: "lint",
        when: Predicate::On(Toggle::Lint),
        body: &[Span::Text("lint: phony fmt ## lint the codes\n\t@golint ./...\n")],
    },
    Fragment {
        name: "vet",
        when: Predicate::Always,
        body: &[
            Span::Text("vet: phony "),
            Span::When(Predicate::On(Toggle::Lint), "lint"),
            Span::When(Predicate::Off(Toggle::Lint), "fmt"),
            Span::Text(" ## vet the codes\n\t@go vet ./...\n"),
            Span::When(Predicate::On(Toggle::Shadow), "\t@shadow ./...\n"),
            Span::Text("\n"),
        ],
    },
    Fragment {
        name: "build-binary",
        when: Predicate::Off(Toggle::Library),
        body: &[Span::Text(concat!(
            "build: phony vet | $(BIN) ## build the binary\n",
            "\t@go build \\\n",
            "\t\t-tags release \\\n",
            "\t\t-ldflags '-X main.Version=$(VERSION)' \\\n",
            "\t\t-o $(BIN)/ ./...\n",
            "\n",
            "run: phony vet ## run the binary\n",
            "\t@go run main.go\n",
        ))],
    },
    Fragment {
        name: "build-library",
        when: Predicate::On(Toggle::Library),
        body: &[Span::Text("build: phony vet ## build the library\n\t@go build ./...\n")],
    },
    Fragment {
        name: "clean",
        when: Predicate::Always,
        body: &[Span::Text("clean: phony ## remove build output\n\trm -rf $(BIN)\n")],
    },
    Fragment {
        name: "test",
        when: Predicate::On(Toggle::Test),
        body: &[Span::Text("test: phony vet ## test the codes\n\t@go test -v ./...\n")],
    },
    Fragment {
        name: "bench",
        when: Predicate::On(Toggle::Bench),
        body: &[Span::Text(
            "bench: phony vet ## test with benchmarks\n\t@go test -v -bench=. -benchmem ./...\n",
        )],
    },
    Fragment {
        name: "test-cover",
        when: Predicate::All(&[Predicate::On(Toggle::Test), Predicate::On(Toggle::Cover)]),
        body: &[Span::Text(
            "test-cover: phony vet ## test with coverage\n\t@go test -v -cover ./...\n",
        )],
    },
    Fragment {
        name: "test-cover-html",
        when: Predicate::All(&[Predicate::On(Toggle::Test), Predicate::On(Toggle::CoverHtml)]),
        body: &[Span::Text(concat!(
            "test-cover-html: phony vet ## test with coverage in an HTML view\n",
            "\t@go test -v -cover -coverprofile=c.out ./...\n",
            "\t@go tool cover -html=c.out\n",
        ))],
    },
    Fragment {
        name: "test-race",
        when: Predicate::On(Toggle::TestRace),
        body: &[Span::Text(
            "test-race: phony vet ## test and check for race conditions\n\t@go test -race ./...\n",
        )],
    },
    Fragment {
        name: "build-race",
        when: Predicate::On(Toggle::Race),
        body: &[Span::Text(
            "build-race: phony vet ## build and check for race conditions\n\t@go build -race ./...\n",
        )],
    },
    Fragment {
        name: "test-cpu",
        when: Predicate::On(Toggle::CpuProfile),
        body: &[
            Span::Text("test-cpu: phony vet ## test and profile CPU\n\t@go test "),
            BENCH_FLAGS,
            Span::Text("-cpuprofile cpu.out ./...\n\t@go tool pprof cpu.out\n"),
        ],
    },
    Fragment {
        name: "test-mem",
        when: Predicate::On(Toggle::MemProfile),
        body: &[
            Span::Text("test-mem: phony vet ## test and profile memory\n\t@go test "),
            BENCH_FLAGS,
            Span::Text("-memprofile mem.out ./...\n\t@go tool pprof mem.out\n"),
        ],
    },
    Fragment {
        name: "help",
        when: Predicate::Always,
        body: &[
            Span::Text(concat!(
                "GREEN  := $(shell tput -Txterm setaf 2)\n",
                "RESET  := $(shell tput -Txterm sgr0)\n",
                "\n",
                "help: phony ## print this help message\n",
                "\t@awk ",
            )),
            Span::Text(concat!(
                r#"-F ':|##' '/^[^\t].+?:.*?##/ { printf "${GREEN}%-20s${RESET}%s\n", $$1, $$NF }' $(MAKEFILE_LIST)"#,
                "\n",
            )),
        ],
    },
];
